//! Block document model for quire posts.
//!
//! [`nodes`] holds the typed tree every pipeline stage works on; [`raw`] is the lenient JSON
//! wire shape it is decoded from and encoded to.

pub mod nodes;
pub(crate) mod raw;

pub use raw::DOC_TYPE;
