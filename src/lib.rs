//! xmluuid: assign stable UUID attributes to every element of an XML document.
//!
//! The library surface is `tag_file` (load, tag, save) and `assign_uuid`
//! (the in-memory traversal). The binary in `main.rs` is a thin clap
//! wrapper around them.

pub mod cli;
pub mod errors;
pub mod exitcode;
pub mod tagger;
pub mod util;

pub use errors::{TagError, TagResult};
pub use tagger::{assign_uuid, tag_file, UUID_ATTR};
