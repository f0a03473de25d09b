//! Providers of raw candidate names for each category.
//!
//! The engine never talks to the host project directly; it asks a
//! [`NameSource`] for the raw strings at generation time. Sources return
//! names as the host stores them: sanitizing and de-duplication happen in
//! the engine.

mod unity;

pub use unity::{
    parse_axes, parse_layers, parse_sorting_layers, parse_tags, ProjectSettingsSource,
    BUILTIN_TAGS, INPUT_MANAGER_FILE, TAG_MANAGER_FILE,
};

use crate::error::AppError;

/// Supplies the raw names for one category.
pub trait NameSource {
    fn names(&self) -> Result<Vec<String>, AppError>;
}

/// Any closure returning a name list is a source.
impl<F> NameSource for F
where
    F: Fn() -> Vec<String>,
{
    fn names(&self) -> Result<Vec<String>, AppError> {
        Ok(self())
    }
}

/// Fixed list, typically from the `[names]` configuration table.
#[derive(Debug, Clone, Default)]
pub struct StaticNames(pub Vec<String>);

impl NameSource for StaticNames {
    fn names(&self) -> Result<Vec<String>, AppError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_source() {
        let source = || vec!["A".to_string(), "B".to_string()];
        assert_eq!(source.names().unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_static_source() {
        let source = StaticNames(vec!["Jump".to_string()]);
        assert_eq!(source.names().unwrap(), vec!["Jump"]);
    }
}
