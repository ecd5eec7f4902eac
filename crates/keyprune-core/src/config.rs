//! Module: config
//! Responsibility: runtime knobs for condition evaluation.
//! Does not own: where the TOML text comes from.

use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid pruning config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// PruningConfig
///
/// `max_key_columns` caps how many leading key columns the enumerator
/// considers. Dropping trailing columns only widens each rectangle.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PruningConfig {
    pub record_metrics: bool,
    pub max_key_columns: Option<usize>,
}

impl PruningConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Effective key size for one evaluation.
    #[must_use]
    pub fn effective_key_size(&self, used_key_size: usize) -> usize {
        self.max_key_columns
            .map_or(used_key_size, |cap| used_key_size.min(cap))
    }
}

impl Default for PruningConfig {
    fn default() -> Self {
        Self {
            record_metrics: true,
            max_key_columns: None,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PruningConfig::from_toml_str("").expect("empty config parses");

        assert_eq!(config, PruningConfig::default());
        assert!(config.record_metrics);
        assert_eq!(config.effective_key_size(3), 3);
    }

    #[test]
    fn key_column_cap_limits_effective_size() {
        let config = PruningConfig::from_toml_str(
            "record_metrics = false\nmax_key_columns = 2\n",
        )
        .expect("config parses");

        assert!(!config.record_metrics);
        assert_eq!(config.effective_key_size(3), 2);
        assert_eq!(config.effective_key_size(1), 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PruningConfig::from_toml_str("max_columns = 2").expect_err("unknown key");

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
