//! Name lists read from a Unity project's `ProjectSettings` directory.
//!
//! `TagManager.asset` holds custom tags, the 32 layer slots and the sorting
//! layers; `InputManager.asset` holds the input axes. Both are YAML 1.1
//! documents tagged `!u!<class id>` under a `%TAG !u!` directive. Names
//! outside ASCII are written as double-quoted scalars with `\u` escapes.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::Deserialize;
use serde_yaml::Value;

use super::NameSource;
use crate::error::AppError;
use crate::models::Category;

pub const TAG_MANAGER_FILE: &str = "TagManager.asset";
pub const INPUT_MANAGER_FILE: &str = "InputManager.asset";

/// Tags every project has; they are not listed in `TagManager.asset`.
pub const BUILTIN_TAGS: &[&str] = &[
    "Untagged",
    "Respawn",
    "Finish",
    "EditorOnly",
    "MainCamera",
    "Player",
    "GameController",
];

/// Reads one category's names from the settings directory.
#[derive(Debug, Clone)]
pub struct ProjectSettingsSource {
    settings_dir: PathBuf,
    category: Category,
}

impl ProjectSettingsSource {
    pub fn new(settings_dir: impl Into<PathBuf>, category: Category) -> Self {
        Self {
            settings_dir: settings_dir.into(),
            category,
        }
    }

    /// Settings file this source reads.
    pub fn file(&self) -> PathBuf {
        let name = match self.category {
            Category::Button => INPUT_MANAGER_FILE,
            Category::Tag | Category::Layer | Category::SortingLayer => TAG_MANAGER_FILE,
        };
        self.settings_dir.join(name)
    }

    fn error(&self, path: &Path, e: impl std::fmt::Display) -> AppError {
        AppError::NameSource {
            category: self.category,
            message: format!("{}: {}", path.display(), e),
        }
    }
}

impl NameSource for ProjectSettingsSource {
    fn names(&self) -> Result<Vec<String>, AppError> {
        let path = self.file();
        let text = std::fs::read_to_string(&path).map_err(|e| self.error(&path, e))?;
        let names = match self.category {
            Category::Tag => parse_tags(&text),
            Category::Layer => parse_layers(&text),
            Category::SortingLayer => parse_sorting_layers(&text),
            Category::Button => parse_axes(&text),
        }
        .map_err(|e| self.error(&path, e))?;

        tracing::debug!(
            category = %self.category,
            file = %path.display(),
            count = names.len(),
            "Read names from project settings"
        );
        Ok(names)
    }
}

/// Built-in tags followed by the project's custom tags.
pub fn parse_tags(text: &str) -> Result<Vec<String>, serde_yaml::Error> {
    let manager = settings_object(text, "TagManager")?;
    Ok(BUILTIN_TAGS
        .iter()
        .map(|t| t.to_string())
        .chain(items(&manager, "tags").filter_map(scalar))
        .collect())
}

/// Named layer slots; unused slots are empty and skipped.
pub fn parse_layers(text: &str) -> Result<Vec<String>, serde_yaml::Error> {
    let manager = settings_object(text, "TagManager")?;
    Ok(items(&manager, "layers")
        .filter_map(scalar)
        .filter(|name| !name.is_empty())
        .collect())
}

pub fn parse_sorting_layers(text: &str) -> Result<Vec<String>, serde_yaml::Error> {
    let manager = settings_object(text, "TagManager")?;
    Ok(items(&manager, "m_SortingLayers")
        .filter_map(|layer| layer.get("name"))
        .filter_map(scalar)
        .collect())
}

/// Input axis names, de-duplicated at the source.
///
/// Unity projects usually define several axes with the same name (one per
/// device), so duplicates are the norm here.
pub fn parse_axes(text: &str) -> Result<Vec<String>, serde_yaml::Error> {
    let manager = settings_object(text, "InputManager")?;
    let names: IndexSet<String> = items(&manager, "m_Axes")
        .filter_map(|axis| axis.get("m_Name"))
        .filter_map(scalar)
        .filter(|name| !name.is_empty())
        .collect();
    Ok(names.into_iter().collect())
}

/// Body of the first document whose root mapping has the key `object`.
///
/// `Value::Null` when no document defines it.
fn settings_object(text: &str, object: &str) -> Result<Value, serde_yaml::Error> {
    for document in serde_yaml::Deserializer::from_str(text) {
        if let Value::Mapping(mut root) = untag(Value::deserialize(document)?) {
            if let Some(body) = root.remove(object) {
                return Ok(untag(body));
            }
        }
    }
    Ok(Value::Null)
}

/// Drop `!u!<id>` tags.
fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

/// Elements of the sequence under `key`; nothing when absent.
fn items<'a>(object: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    object
        .get(key)
        .and_then(Value::as_sequence)
        .into_iter()
        .flatten()
}

/// Scalar as text; empty slots (`null`) yield `None`.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
