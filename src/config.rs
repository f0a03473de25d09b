//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/enumgen/config.toml` (XDG) or platform config dir
//! 2. Project config: `.enumgen.toml` in the project directory
//! 3. Environment variables: `ENUMGEN_*`, nested keys separated by `__`
//!    (e.g. `ENUMGEN_PROJECT__SOURCE_ROOT`)
//!
//! Every key is optional. A project config typically overrides class names
//! or pins name lists that are not kept in `ProjectSettings`:
//!
//! ```toml
//! [project]
//! source_root = "Assets"
//! default_base_dir = "Scripts/Generated/"
//! busy_markers = ["Temp/compiling.lock"]
//!
//! [classes]
//! tag = "GameTag"
//!
//! [names]
//! button = ["Jump", "Fire1", "Submit"]
//! ```

use std::collections::BTreeMap;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::models::Category;

/// Project config file name, looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = ".enumgen.toml";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    /// Class name overrides keyed by category (`tag`, `sorting_layer`, ...).
    #[serde(default)]
    pub classes: BTreeMap<String, String>,
    /// Static name lists keyed by category; replace the settings-file source.
    #[serde(default)]
    pub names: BTreeMap<String, Vec<String>>,
}

/// Project layout and persistence settings.
///
/// Relative paths are resolved against the project directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Fixed root that base directories are relative to.
    pub source_root: PathBuf,
    /// Directory holding `TagManager.asset` and `InputManager.asset`.
    pub settings_dir: PathBuf,
    /// Where the ledger of generated paths is kept.
    pub ledger_path: PathBuf,
    /// Base directory used until one is saved in the ledger.
    pub default_base_dir: String,
    /// Files whose presence means the host is mid-build or running.
    pub busy_markers: Vec<PathBuf>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("Assets"),
            settings_dir: PathBuf::from("ProjectSettings"),
            ledger_path: PathBuf::from(".enumgen/ledger.json"),
            default_base_dir: "Scripts/Generated/".to_string(),
            busy_markers: Vec::new(),
        }
    }
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load_from(project_dir: &Path) -> Result<Self, ConfigError> {
        let user_config = Self::user_config_path();

        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(project_dir.join(PROJECT_CONFIG_FILE)))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("ENUMGEN_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Class name override for `category`, if configured.
    ///
    /// Keys that do not name a category are logged and ignored.
    pub fn class_name(&self, category: Category) -> Option<&str> {
        self.lookup(&self.classes, category).map(String::as_str)
    }

    /// Static names for `category`, if configured.
    pub fn names(&self, category: Category) -> Option<&[String]> {
        self.lookup(&self.names, category).map(Vec::as_slice)
    }

    fn lookup<'a, V>(&self, table: &'a BTreeMap<String, V>, category: Category) -> Option<&'a V> {
        table.iter().find_map(|(key, value)| match key.parse::<Category>() {
            Ok(c) if c == category => Some(value),
            Ok(_) => None,
            Err(e) => {
                tracing::error!(error = %e, "Ignoring config key");
                None
            }
        })
    }

    /// User config path: ~/.config/enumgen/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("enumgen").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("enumgen").join("config.toml"))
            .unwrap_or_default()
    }
}

impl ProjectConfig {
    /// Absolute source root for `project_dir`.
    pub fn source_root_in(&self, project_dir: &Path) -> PathBuf {
        absolute(project_dir, &self.source_root)
    }

    pub fn settings_dir_in(&self, project_dir: &Path) -> PathBuf {
        absolute(project_dir, &self.settings_dir)
    }

    pub fn ledger_path_in(&self, project_dir: &Path) -> PathBuf {
        absolute(project_dir, &self.ledger_path)
    }

    pub fn busy_markers_in(&self, project_dir: &Path) -> Vec<PathBuf> {
        self.busy_markers
            .iter()
            .map(|marker| absolute(project_dir, marker))
            .collect()
    }
}

/// Join `path` onto `base` unless it is already absolute, then make the
/// result absolute against the current directory.
fn absolute(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    if joined.is_absolute() {
        joined
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&joined))
            .unwrap_or(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.project.source_root, PathBuf::from("Assets"));
        assert_eq!(config.project.default_base_dir, "Scripts/Generated/");
        assert!(config.project.busy_markers.is_empty());
        assert_eq!(config.class_name(Category::Tag), None);
    }

    #[test]
    fn test_category_lookup_accepts_aliases() {
        let mut config = Config::default();
        config
            .classes
            .insert("sorting-layer".to_string(), "Sorting".to_string());
        config
            .names
            .insert("button".to_string(), vec!["Jump".to_string()]);
        config
            .classes
            .insert("material".to_string(), "Ignored".to_string());

        assert_eq!(config.class_name(Category::SortingLayer), Some("Sorting"));
        assert_eq!(config.names(Category::Button), Some(&["Jump".to_string()][..]));
        assert_eq!(config.names(Category::Tag), None);
    }

    #[test]
    fn test_paths_resolve_against_project_dir() {
        let project = ProjectConfig::default();
        let dir = Path::new("/work/game");
        assert_eq!(project.source_root_in(dir), PathBuf::from("/work/game/Assets"));
        assert_eq!(
            project.ledger_path_in(dir),
            PathBuf::from("/work/game/.enumgen/ledger.json")
        );

        let absolute_root = ProjectConfig {
            source_root: PathBuf::from("/elsewhere/src"),
            ..ProjectConfig::default()
        };
        assert_eq!(
            absolute_root.source_root_in(dir),
            PathBuf::from("/elsewhere/src")
        );
    }
}
