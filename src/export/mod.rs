//! # Export Layer
//!
//! Serialized model documents and documentation rendering.
//!
//! | Output | Format | Entry point |
//! |--------|--------|-------------|
//! | Model snapshot | JSON or YAML | [`ModelDocument`] |
//! | Documentation outline | Markdown | [`markdown::render`] |
//!
//! Documents are whole-model snapshots written atomically (temp file +
//! rename). Loading a document re-validates everything the typed API
//! guarantees at declaration time.

mod document;
pub mod markdown;

pub use document::{DocumentError, ModelDocument, SCHEMA_VERSION};
