//! Source generation pipeline.
//!
//! Raw names flow through [`sanitize_names`] into [`render`]; the
//! [`PathResolver`] decides where the resulting artifact is written.

mod path;
mod render;
mod sanitize;

pub use path::{normalize_base_dir, PathResolver, SOURCE_EXTENSION};
pub use render::{render, GENERATED_MARKER};
pub use sanitize::{sanitize, sanitize_names};
