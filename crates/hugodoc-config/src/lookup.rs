//! Structured configuration retrieval.
//!
//! A host may fail to hand over its configuration for any reason (missing
//! block, malformed JSON, unreadable file). Rendering never fails because of
//! that: the failure is logged and the renderer continues with defaults.

use crate::{Config, ConfigError};

/// Outcome of retrieving configuration from a host or a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigLookup {
    /// Configuration was supplied and is valid.
    Found(Config),
    /// No usable configuration; defaults apply.
    Absent,
}

impl ConfigLookup {
    /// Run a retrieval closure and classify its result.
    pub fn retrieve<F>(source: F) -> Self
    where
        F: FnOnce() -> Result<Option<Config>, ConfigError>,
    {
        Self::from_result(source())
    }

    /// Classify a retrieval result. Errors are logged and treated as absent.
    pub fn from_result(result: Result<Option<Config>, ConfigError>) -> Self {
        match result {
            Ok(Some(config)) => Self::Found(config),
            Ok(None) => Self::Absent,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to retrieve configuration, using defaults");
                Self::Absent
            }
        }
    }

    /// Retrieve host-supplied JSON configuration.
    ///
    /// `None` or blank input means the host supplied nothing.
    pub fn from_host_json(json: Option<&str>) -> Self {
        Self::retrieve(|| match json.map(str::trim) {
            Some(text) if !text.is_empty() => Config::from_json(text).map(Some),
            _ => Ok(None),
        })
    }

    /// Whether configuration was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The found configuration, or the defaults.
    #[must_use]
    pub fn into_config(self) -> Config {
        match self {
            Self::Found(config) => config,
            Self::Absent => Config::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found() {
        let lookup = ConfigLookup::retrieve(|| Ok(Some(Config::default())));
        assert!(lookup.is_found());
    }

    #[test]
    fn test_absent_when_none() {
        let lookup = ConfigLookup::retrieve(|| Ok(None));
        assert_eq!(lookup, ConfigLookup::Absent);
        assert_eq!(lookup.into_config(), Config::default());
    }

    #[test]
    fn test_error_falls_back_to_defaults() {
        let lookup = ConfigLookup::retrieve(|| {
            Err(ConfigError::Validation("host exploded".to_owned()))
        });
        assert_eq!(lookup, ConfigLookup::Absent);
        assert_eq!(lookup.into_config(), Config::default());
    }

    #[test]
    fn test_from_host_json_valid() {
        let lookup = ConfigLookup::from_host_json(Some(r#"{"titleCapitalize": true}"#));
        let config = lookup.into_config();
        assert!(config.hugo.title_capitalize);
    }

    #[test]
    fn test_from_host_json_blank_is_absent() {
        assert_eq!(ConfigLookup::from_host_json(None), ConfigLookup::Absent);
        assert_eq!(ConfigLookup::from_host_json(Some("  ")), ConfigLookup::Absent);
    }

    #[test]
    fn test_from_host_json_malformed_is_absent() {
        let lookup = ConfigLookup::from_host_json(Some(r#"{"titleCapitalize": "yes"}"#));
        assert_eq!(lookup, ConfigLookup::Absent);
    }
}
