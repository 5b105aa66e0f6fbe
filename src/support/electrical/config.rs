//! Project-level sizing limits, loadable from TOML.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;
use uom::si::{f64::Ratio, ratio::percent};

/// Errors raised while loading a [`SizingConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} {message}")]
    Invalid {
        field: &'static str,
        message: &'static str,
    },
}

/// Tunable limits shared by both standards.
///
/// Every field has a default, so an empty TOML document yields
/// [`SizingConfig::default`].
///
/// ```
/// use circuit_sizing::support::electrical::SizingConfig;
///
/// let config = SizingConfig::from_toml_str("voltage_drop_limit_percent = 5.0")?;
/// assert_eq!(config.voltage_drop_limit_percent, 5.0);
/// assert_eq!(config.max_parallel_runs, 6);
///
/// assert!(SizingConfig::from_toml_str("max_parallel_runs = 1").is_err());
/// assert!(SizingConfig::from_toml_str("max_runs = 3").is_err());
/// # Ok::<(), circuit_sizing::support::electrical::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    /// Maximum branch circuit voltage drop in percent (must be > 0).
    pub voltage_drop_limit_percent: f64,

    /// Largest number of parallel feeder runs considered (must be ≥ 2).
    pub max_parallel_runs: u32,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            voltage_drop_limit_percent: 3.0,
            max_parallel_runs: 6,
        }
    }
}

impl SizingConfig {
    /// Parses and validates a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, the TOML is
    /// malformed or contains unknown fields, or a value is out of range.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the TOML is malformed or contains unknown
    /// fields, or a value is out of range.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range field as [`ConfigError::Invalid`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Negated so NaN is rejected too.
        if !(self.voltage_drop_limit_percent > 0.0) {
            return Err(ConfigError::Invalid {
                field: "voltage_drop_limit_percent",
                message: "must be > 0",
            });
        }
        if self.max_parallel_runs < 2 {
            return Err(ConfigError::Invalid {
                field: "max_parallel_runs",
                message: "must be >= 2",
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn voltage_drop_limit(&self) -> Ratio {
        Ratio::new::<percent>(self.voltage_drop_limit_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    #[test]
    fn empty_document_is_default() {
        let config = SizingConfig::from_toml_str("").unwrap();
        assert_eq!(config, SizingConfig::default());
        assert!((config.voltage_drop_limit().get::<percent>() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn overrides() {
        let config = SizingConfig::from_toml_str(
            "voltage_drop_limit_percent = 2.5\nmax_parallel_runs = 4\n",
        )
        .unwrap();
        assert_eq!(config.voltage_drop_limit_percent, 2.5);
        assert_eq!(config.max_parallel_runs, 4);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            SizingConfig::from_toml_str("voltage_drop_limit_percent = 0.0"),
            Err(ConfigError::Invalid {
                field: "voltage_drop_limit_percent",
                ..
            })
        ));
        assert!(matches!(
            SizingConfig::from_toml_str("voltage_drop_limit_percent = nan"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            SizingConfig::from_toml_str("max_parallel_runs = 1"),
            Err(ConfigError::Invalid {
                field: "max_parallel_runs",
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_fields_and_bad_types() {
        assert!(matches!(
            SizingConfig::from_toml_str("voltage_drop = 3.0"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SizingConfig::from_toml_str("max_parallel_runs = \"six\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file() {
        let path = PathBuf::from("/nonexistent/circuit-sizing.toml");
        let err = SizingConfig::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("circuit-sizing.toml"));
    }
}
