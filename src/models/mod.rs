//! Domain models for enum generation.

mod artifact;
mod category;

pub use artifact::GeneratedArtifact;
pub use category::Category;
