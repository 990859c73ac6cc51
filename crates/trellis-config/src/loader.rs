//! Loading configuration from files and strings

use crate::config::TrellisConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid for its format
    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: ConfigFormat,
        message: String,
    },

    /// The file extension does not name a supported format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The configuration parsed but violates a constraint
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    fn parse(format: ConfigFormat, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            format,
            message: err.to_string(),
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    #[cfg(feature = "toml")]
    Toml,
    #[cfg(feature = "yaml")]
    Yaml,
    Json,
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            #[cfg(feature = "toml")]
            ConfigFormat::Toml => "TOML",
            #[cfg(feature = "yaml")]
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        };
        f.write_str(name)
    }
}

impl ConfigFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            #[cfg(feature = "toml")]
            "toml" => Ok(ConfigFormat::Toml),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a configuration file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<TrellisConfig, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), %format, "loading config");
        Self::load_from_str(&text, format)
    }

    /// Parse and validate configuration text.
    pub fn load_from_str(text: &str, format: ConfigFormat) -> Result<TrellisConfig, ConfigError> {
        let config: TrellisConfig = match format {
            #[cfg(feature = "toml")]
            ConfigFormat::Toml => toml::from_str(text).map_err(|e| ConfigError::parse(format, e))?,
            #[cfg(feature = "yaml")]
            ConfigFormat::Yaml => {
                if text.trim().is_empty() {
                    TrellisConfig::default()
                } else {
                    serde_yaml::from_str(text).map_err(|e| ConfigError::parse(format, e))?
                }
            }
            ConfigFormat::Json => {
                serde_json::from_str(text).map_err(|e| ConfigError::parse(format, e))?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the given file, or fall back to defaults when no path is supplied.
    pub fn load_or_default(path: Option<&Path>) -> Result<TrellisConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                debug!("no config file given, using defaults");
                Ok(TrellisConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchStrategy;

    #[test]
    fn json_partial_config_fills_defaults() {
        let config =
            ConfigLoader::load_from_str(r#"{"render": {"strategy": "positional"}}"#, ConfigFormat::Json)
                .unwrap();
        assert_eq!(config.render.strategy, MatchStrategy::Positional);
        assert!(config.render.clear_stale_props);
        assert_eq!(config.demo.fetch_delay_ms, 2000);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = ConfigFormat::from_path(Path::new("trellis.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = ConfigLoader::load_from_str(
            r#"{"render": {"max_component_depth": 0}}"#,
            ConfigFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_path_means_defaults() {
        let config = ConfigLoader::load_or_default(None).unwrap();
        assert_eq!(config, TrellisConfig::default());
    }
}
