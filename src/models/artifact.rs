//! Rendered source artifact.

/// Immutable text produced by one generation request.
///
/// Built fresh for every request and written whole, replacing any
/// previous content at the target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    class_name: String,
    members: Vec<String>,
    text: String,
}

impl GeneratedArtifact {
    pub(crate) fn new(class_name: String, members: Vec<String>, text: String) -> Self {
        Self {
            class_name,
            members,
            text,
        }
    }

    /// Name of the generated enum.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Enum members in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Full file contents.
    pub fn text(&self) -> &str {
        &self.text
    }
}
