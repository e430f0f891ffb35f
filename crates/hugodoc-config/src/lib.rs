//! Configuration management for hugodoc.
//!
//! Parses `hugodoc.toml` configuration files (or the equivalent JSON object
//! handed over by a documentation host) with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The title options use the host's camelCase names; snake_case spellings
//! are accepted as aliases:
//!
//! ```toml
//! titleReplace = { "com.example." = "" }
//! titleCapitalize = true
//! linkTitleReplace = { "com.example." = "" }
//! linkTitleCapitalize = false
//!
//! [menu]
//! name = "docs"
//! parent = "hw-security-reference"
//! weight = 1
//! ```
//!
//! Retrieval failures are never fatal for rendering: [`ConfigLookup`] turns
//! them into an explicit "absent" result that falls back to defaults.

mod lookup;
mod replace;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use lookup::ConfigLookup;
pub use replace::Replacements;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "hugodoc.toml";

/// Title rewriting options.
///
/// An all-default value is the identity formatter: no replacement and no
/// capitalization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HugoConfig {
    /// Replacements applied to page titles.
    #[serde(alias = "title_replace")]
    pub title_replace: Option<Replacements>,
    /// Uppercase the first character of page titles.
    #[serde(alias = "title_capitalize")]
    pub title_capitalize: bool,
    /// Replacements applied to navigation menu titles.
    #[serde(alias = "link_title_replace")]
    pub link_title_replace: Option<Replacements>,
    /// Uppercase the first character of navigation menu titles.
    #[serde(alias = "link_title_capitalize")]
    pub link_title_capitalize: bool,
}

/// Menu placement for package-index pages.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Hugo menu name (`[menu.<name>]`).
    pub name: String,
    /// Parent menu entry identifier.
    pub parent: String,
    /// Menu weight.
    pub weight: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            name: "docs".to_owned(),
            parent: "hw-security-reference".to_owned(),
            weight: 1,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Title rewriting options.
    #[serde(flatten)]
    pub hugo: HugoConfig,
    /// Menu placement for package-index pages.
    pub menu: MenuConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// JSON parsing error (host-supplied configuration).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require every replacement key to be non-empty.
///
/// An empty key would match between every pair of characters.
fn require_non_empty_keys(
    replacements: Option<&Replacements>,
    field: &str,
) -> Result<(), ConfigError> {
    if replacements.is_some_and(|r| r.iter().any(|(from, _)| from.is_empty())) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain an empty key"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `hugodoc.toml` in current directory and parents
    /// and falls back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse host-supplied configuration given as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed input and
    /// `ConfigError::Validation` for invalid values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed input and
    /// `ConfigError::Validation` for invalid values.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.menu.name, "menu.name")?;
        require_non_empty(&self.menu.parent, "menu.parent")?;
        require_non_empty_keys(self.hugo.title_replace.as_ref(), "titleReplace")?;
        require_non_empty_keys(self.hugo.link_title_replace.as_ref(), "linkTitleReplace")?;
        Ok(())
    }
}
