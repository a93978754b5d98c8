// Command-line interface for quire
//
// This binary provides commands for inspecting and converting stored post bodies.
//
// A post body is either legacy plain text or the structured editor JSON. Every command goes
// through the same detection as the blog read path, so a `.txt` file holding editor JSON is
// still treated as a structured document.
//
// The inspect command is a development aid for the line classifier and the compiler.
//
// Converting:
//
// The source format is auto-detected from the file extension and falls back to content
// detection ("text") when the extension is unknown. An explicit --from overrides it.
// Usage:
//  quire <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  quire convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  quire inspect <path> [<transform>]     - Execute a transform (defaults to "doc-treeviz")
//  quire meta <path> [--title <title>]    - Print slug, excerpt, word count and reading time
//  quire --list-transforms                - List available transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/transform.
// Example:
//  quire inspect post.txt --extra-max-label 20 --extra-show-marks false

use quire_cli::transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use quire_babel::formats::html::HtmlOptions;
use quire_babel::formats::treeviz::TreevizOptions;
use quire_babel::formats::{HtmlFormat, TreevizFormat};
use quire_babel::{Content, FormatRegistry, PostMeta};
use quire_config::{Loader, QuireConfig};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["inspect", "convert", "meta", "generate-css", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            // A value follows unless the next arg is another flag or the end
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and converting quire post bodies")
        .long_about(
            "quire is a command-line tool for working with blog post bodies.\n\n\
            Commands:\n  \
            - inspect: View how a body is classified and compiled\n  \
            - convert: Transform between formats (text, json, html, treeviz)\n  \
            - meta:    Derive slug, excerpt and reading time\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            quire inspect post.txt                     # View document tree\n  \
            quire inspect post.txt line-classes        # View per-line classification\n  \
            quire post.txt --to html                   # Render to HTML (stdout)\n  \
            quire post.txt --to json -o post.json      # Migrate to editor JSON\n  \
            quire meta post.txt --title 'Hello World'  # Derived metadata"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a quire.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect how a post body is classified and compiled")
                .long_about(
                    "View a post body at different pipeline stages.\n\n\
                    Transforms:\n  \
                    - doc-treeviz:  Document as tree visualization (default)\n  \
                    - doc-json:     Document as editor JSON\n  \
                    - line-classes: Classification of every line\n  \
                    - plain-text:   Extracted plain text\n  \
                    - stats:        Word count, reading time, blocks and excerpt\n\n\
                    Extra Parameters:\n  \
                    --extra-show-marks false   Hide inline marks in doc-treeviz\n  \
                    --extra-max-label <n>      Truncate doc-treeviz labels\n  \
                    --extra-excerpt-length <n> Excerpt size for stats\n\n\
                    Examples:\n  \
                    quire inspect post.txt                  # Tree visualization (default)\n  \
                    quire inspect post.txt line-classes     # Per-line heuristics\n  \
                    quire inspect post.json stats           # Derived numbers"
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the post body")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'doc-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert post bodies between formats.\n\n\
                    Supported formats:\n  \
                    - text:    Legacy plain text (.txt)\n  \
                    - json:    Structured editor JSON (.json)\n  \
                    - html:    Rendered HTML (.html)\n  \
                    - treeviz: Tree visualization\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    quire convert post.txt --to json -o post.json  # Migrate a legacy post\n  \
                    quire convert post.json --to html              # Render\n  \
                    quire post.txt --to html --extra-standalone    # Full HTML page"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: text, json, html, treeviz\n\
                            Use the format name, not the file extension."
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("meta")
                .about("Print the metadata derived from a post body as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the post body")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Post title used for the slug (defaults to the file stem)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("excerpt-length")
                        .long("excerpt-length")
                        .help("Excerpt size in characters (defaults to meta.excerpt_length)")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the default CSS used for HTML export")
                .long_about(
                    "Outputs the baseline CSS for the classes the HTML renderer emits.\n\n\
                    Use this as a starting point for custom styling. The output can be\n\
                    saved to a file and customized, then passed via --extra-css to the\n\
                    convert command.\n\n\
                    Examples:\n  \
                    quire generate-css                 # Print CSS to stdout\n  \
                    quire generate-css > custom.css    # Save to file for editing"
                ),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that is not a subcommand is taken as a convert input
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &mut extra_params,
    );

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = required_arg(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("doc-treeviz");
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            let to = required_arg(sub_matches, "to");
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => {
                    let registry = FormatRegistry::default();
                    registry.detect_format_from_filename(input).unwrap_or_else(|| {
                        debug!(input, "unknown extension, detecting from content");
                        "text".to_string()
                    })
                }
            };
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("meta", sub_matches)) => {
            let path = required_arg(sub_matches, "path");
            let title = sub_matches.get_one::<String>("title").map(|s| s.as_str());
            if let Some(length) = sub_matches.get_one::<usize>("excerpt-length") {
                config.meta.excerpt_length = *length;
            }
            handle_meta_command(path, title, &config);
        }
        Some(("generate-css", _)) => {
            handle_generate_css_command();
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required_arg<'a>(matches: &'a clap::ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or_else(|| {
            eprintln!("Missing required argument '{name}'");
            std::process::exit(1);
        })
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &QuireConfig,
) {
    let source = read_source(path);

    let params = build_inspect_params(config, extra_params);
    let output = transforms::execute_transform(&source, transform, &params).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &QuireConfig,
) {
    let registry = configured_registry(config);

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_source(input);

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    debug!(from, to, blocks = doc.content.len(), "parsed input");

    // Configured options live on the registered formats; leftover extras layer on top
    let result = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Handle the meta command
fn handle_meta_command(path: &str, title: Option<&str>, config: &QuireConfig) {
    let source = read_source(path);

    let title = title.map(str::to_string).unwrap_or_else(|| {
        Path::new(path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let meta = PostMeta::derive(&title, Content::Text(&source), config.meta.excerpt_length);
    let json = serde_json::to_string_pretty(&meta).unwrap_or_else(|e| {
        eprintln!("JSON serialization failed: {e}");
        std::process::exit(1);
    });
    println!("{json}");
}

/// Handle the generate-css command
fn handle_generate_css_command() {
    print!("{}", quire_babel::formats::get_default_css());
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Stages:");
    println!("  line        - Per-line classification of legacy text");
    println!("  doc         - Compiled document");
    println!("  extraction  - Plain text and derived numbers\n");
    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
    println!("\nConversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        println!("  {format_name}");
    }
}

fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &mut HashMap<String, String>,
) -> QuireConfig {
    let loader = Loader::new().with_optional_file("quire.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    apply_config_overrides(loader, extra_params)
        .build()
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

/// Move the extra parameters that name config keys onto the loader.
fn apply_config_overrides(
    mut loader: Loader,
    extra_params: &mut HashMap<String, String>,
) -> Loader {
    if let Some(raw) = take_override(extra_params, &["class", "class-name"]) {
        loader = or_exit(loader.set_override("convert.html.class_name", raw));
    }
    if let Some(raw) = extra_params.remove("standalone") {
        let standalone = parse_bool_arg("standalone", &raw);
        loader = or_exit(loader.set_override("convert.html.standalone", standalone));
    }
    if let Some(raw) = extra_params.remove("title") {
        loader = or_exit(loader.set_override("convert.html.title", raw));
    }
    if let Some(path) = take_override(extra_params, &["css", "css-path"]) {
        loader = or_exit(loader.set_override("convert.html.custom_css", path));
    }
    if let Some(raw) = extra_params.remove("excerpt-length") {
        let length = parse_usize_arg("excerpt-length", &raw);
        loader = or_exit(loader.set_override("meta.excerpt_length", as_config_int(length)));
    }
    if let Some(raw) = extra_params.remove("show-marks") {
        let show_marks = parse_bool_arg("show-marks", &raw);
        loader = or_exit(loader.set_override("inspect.treeviz.show_marks", show_marks));
    }
    if let Some(raw) = extra_params.remove("max-label") {
        let max_label = parse_usize_arg("max-label", &raw);
        loader = or_exit(
            loader.set_override("inspect.treeviz.max_label", as_config_int(max_label)),
        );
    }
    loader
}

fn or_exit<E: std::fmt::Display>(result: Result<Loader, E>) -> Loader {
    result.unwrap_or_else(|err| {
        eprintln!("Invalid configuration override: {err}");
        std::process::exit(1);
    })
}

fn as_config_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Formats registered with the options the configuration picks.
fn configured_registry(config: &QuireConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::default();
    registry.register(HtmlFormat::new(html_options_from_config(config)));
    registry.register(TreevizFormat::new(TreevizOptions::from(&config.inspect.treeviz)));
    registry
}

fn html_options_from_config(config: &QuireConfig) -> HtmlOptions {
    let html = &config.convert.html;
    let mut options = HtmlOptions::from(html);
    if let Some(css_path) = &html.custom_css {
        let css = fs::read_to_string(css_path).unwrap_or_else(|e| {
            eprintln!("Error reading stylesheet '{css_path}': {e}");
            std::process::exit(1);
        });
        options.custom_css = Some(css);
    }
    options
}

fn build_inspect_params(
    config: &QuireConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let treeviz = &config.inspect.treeviz;
    let mut params = HashMap::from([
        ("show-marks".to_string(), treeviz.show_marks.to_string()),
        ("max-label".to_string(), treeviz.max_label.to_string()),
        (
            "excerpt-length".to_string(),
            config.meta.excerpt_length.to_string(),
        ),
    ]);

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.remove(*key))
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

fn parse_usize_arg(flag: &str, raw: &str) -> usize {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid number '{raw}' for --extra-{flag}");
        std::process::exit(1);
    })
}
