//! Decoder for SWF movies: the length-prefixed tag stream and the AVM1 action
//! bytecode embedded in it.
//!
//! Layers:
//! - **Cursor** (`cursor`): byte and bit reads over a slice or a stream
//! - **Registries** (`registry`): id → loader tables, built once and shared
//! - **Tag stream** (`tag_stream`, `tags`): record loop with length
//!   checks and nested containers
//! - **Actions** (`avm1`): opcode loop with bit-packed operand loaders
//! - **Movie** (`header`, `movie`): file envelope around the top-level stream

pub mod avm1;
pub mod config;
pub mod cursor;
pub mod error;
pub mod header;
pub mod movie;
pub mod registry;
pub mod tag;
pub mod tag_stream;
pub mod tags;

pub use config::DecodeOptions;
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use header::Header;
pub use movie::Movie;
pub use registry::{ActionLoader, ActionRegistry, Registries, TagLoader, TagRegistry};
pub use tag::{Tag, TagHeader, TagRecord};
pub use tag_stream::{decode_tags, DecodeContext};
