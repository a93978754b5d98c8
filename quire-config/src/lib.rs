//! Shared configuration loader for the quire toolchain.
//!
//! `defaults/quire.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`QuireConfig`].
//!
//! The document pipeline itself takes no configuration; these settings only pick
//! the options the CLI hands to it.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use quire_babel::formats::html::HtmlOptions;
use quire_babel::formats::treeviz::TreevizOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/quire.default.toml");

/// Top-level configuration consumed by quire applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QuireConfig {
    pub convert: ConvertConfig,
    pub meta: MetaConfig,
    pub inspect: InspectConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub class_name: String,
    pub standalone: bool,
    pub title: String,
    /// Path to a stylesheet; reading it is left to the caller.
    #[serde(default)]
    pub custom_css: Option<String>,
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions {
            class_name: config.class_name.clone(),
            standalone: config.standalone,
            title: config.title.clone(),
            custom_css: None,
        }
    }
}

/// Derived post metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaConfig {
    pub excerpt_length: usize,
}

/// Controls inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub treeviz: TreevizConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreevizConfig {
    pub show_marks: bool,
    pub max_label: usize,
}

impl From<&TreevizConfig> for TreevizOptions {
    fn from(config: &TreevizConfig) -> Self {
        TreevizOptions {
            show_marks: config.show_marks,
            max_label: config.max_label,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<QuireConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QuireConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.convert.html.class_name, "article-content");
        assert!(!config.convert.html.standalone);
        assert!(config.convert.html.custom_css.is_none());
        assert_eq!(config.meta.excerpt_length, 150);
        assert!(config.inspect.treeviz.show_marks);
        assert_eq!(config.inspect.treeviz.max_label, 40);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("meta.excerpt_length", 80_i64)
            .expect("override to apply")
            .set_override("convert.html.custom_css", "post.css")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.meta.excerpt_length, 80);
        assert_eq!(config.convert.html.custom_css.as_deref(), Some("post.css"));
    }

    #[test]
    fn html_config_converts_to_html_options() {
        let config = load_defaults().expect("defaults to deserialize");
        let options: HtmlOptions = (&config.convert.html).into();
        assert_eq!(options.class_name, "article-content");
        assert!(!options.standalone);
        assert_eq!(options.title, "Untitled");
        assert!(options.custom_css.is_none());
    }

    #[test]
    fn treeviz_config_converts_to_treeviz_options() {
        let config = load_defaults().expect("defaults to deserialize");
        let options: TreevizOptions = (&config.inspect.treeviz).into();
        assert_eq!(options, TreevizOptions::default());
    }
}
