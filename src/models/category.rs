//! Category enum naming the fixed set of generation targets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fixed generation targets.
///
/// Each category produces one enum file whose class name defaults to
/// [`Category::default_class_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tag,
    Layer,
    SortingLayer,
    Button,
}

impl Category {
    /// Returns a static slice of all categories in display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Tag,
            Category::Layer,
            Category::SortingLayer,
            Category::Button,
        ]
    }

    /// Class name used for the generated enum unless overridden.
    pub fn default_class_name(&self) -> &'static str {
        match self {
            Category::Tag => "TagName",
            Category::Layer => "LayerName",
            Category::SortingLayer => "SortingLayerName",
            Category::Button => "ButtonName",
        }
    }

    /// Stable key used in the ledger file and configuration tables.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Tag => "tag",
            Category::Layer => "layer",
            Category::SortingLayer => "sorting_layer",
            Category::Button => "button",
        }
    }

    /// Returns a human-readable description of this category.
    pub fn description(&self) -> &'static str {
        match self {
            Category::Tag => "Object tags",
            Category::Layer => "Physics and rendering layers",
            Category::SortingLayer => "2D sorting layers",
            Category::Button => "Input manager axis names",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "tag" | "tags" => Ok(Category::Tag),
            "layer" | "layers" => Ok(Category::Layer),
            "sortinglayer" | "sortinglayers" => Ok(Category::SortingLayer),
            "button" | "buttons" | "axis" | "axes" => Ok(Category::Button),
            _ => Err(AppError::UndefinedCategory(s.to_string())),
        }
    }
}
