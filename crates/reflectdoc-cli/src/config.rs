//! Configuration management for the CLI
//!
//! Configuration is loaded from, in order of precedence:
//! - Command-line arguments (applied by the handlers)
//! - An explicit `--config` file or `REFLECTDOC_CONFIG`
//! - `.reflectdoc.yaml`, `.reflectdoc.json` or `reflectdoc.yaml` in the
//!   working directory
//! - `<config_dir>/reflectdoc/config.yaml`
//! - Default values

use crate::error::{Error, Result};
use reflectdoc_core::markdown::{MarkdownOptions, DEFAULT_LINK_PREFIX, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace prefixed to report keys
    pub namespace: String,

    /// Prefix of the links on the navigation page
    pub link_prefix: String,

    /// Default reflection input
    pub infile: PathBuf,

    /// Default test report; the transform command only merges an explicit
    /// `--testfile` or a configured one
    pub testfile: Option<PathBuf>,

    /// Default output directory for the markdown site
    pub docs_dir: PathBuf,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

/// Report file the render command falls back to
pub const DEFAULT_TESTFILE: &str = "test-report.json";

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            infile: PathBuf::from("type-info.json"),
            testfile: None,
            docs_dir: PathBuf::from("docs"),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to load config, skipping");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) if !path.exists() => Err(Error::FileNotFound {
                path: path.to_path_buf(),
            }),
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".reflectdoc.yaml"),
            PathBuf::from(".reflectdoc.json"),
            PathBuf::from("reflectdoc.yaml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("reflectdoc").join("config.yaml"));
        }

        paths
    }

    /// Markdown options with command-line overrides applied
    pub fn markdown_options(&self, namespace: Option<&str>, link_prefix: Option<&str>) -> MarkdownOptions {
        MarkdownOptions {
            namespace: namespace.unwrap_or(&self.namespace).to_string(),
            link_prefix: link_prefix.unwrap_or(&self.link_prefix).to_string(),
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("reflectdoc.yaml");
        std::fs::write(&path, "namespace: container\nlogging:\n  format: json\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.namespace, "container");
        assert_eq!(config.link_prefix, DEFAULT_LINK_PREFIX);
        assert_eq!(config.docs_dir, PathBuf::from("docs"));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert_eq!(config.logging.level, None);
    }

    #[test]
    fn test_json_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, r#"{"testfile": "results/report.json"}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.testfile, Some(PathBuf::from("results/report.json")));
        assert_eq!(config.infile, PathBuf::from("type-info.json"));
    }

    #[test]
    fn test_explicit_config_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yaml");
        assert!(matches!(
            Config::load_with_file(Some(&missing)),
            Err(Error::FileNotFound { .. })
        ));

        let malformed = temp.path().join("bad.json");
        std::fs::write(&malformed, "{ not json").unwrap();
        assert!(matches!(Config::load_with_file(Some(&malformed)), Err(Error::Json(_))));
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            namespace: "container".to_string(),
            ..Config::default()
        };
        let options = config.markdown_options(None, Some("/docs"));
        assert_eq!(options.namespace, "container");
        assert_eq!(options.link_prefix, "/docs");
    }
}
