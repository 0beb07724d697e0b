//! Error types for the reflectdoc core library
//!
//! This module defines the error handling for document generation using
//! thiserror. Only a failure to read the primary reflection input is fatal to
//! a run; report and per-file output problems are surfaced as warnings by the
//! callers that own them.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reflectdoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// The primary reflection input could not be read or parsed
    #[error("Failed to load reflection input {}: {message}", path.display())]
    Input {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Front matter serialization errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Structural query evaluation errors
    #[error("Query error: {message}")]
    Query {
        message: String,
        depth: usize,
    },

    /// Rule engine errors
    #[error("Transform failed: {message}")]
    Transform {
        message: String,
        rule: Option<String>,
    },

    /// Invalid rule or generator configuration
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
    },

    /// A generated file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an input error from any underlying cause
    pub fn input(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Input {
            path: path.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transform error attributed to a rule
    pub fn transform(message: impl Into<String>, rule: Option<&str>) -> Self {
        Error::Transform {
            message: message.into(),
            rule: rule.map(str::to_string),
        }
    }

    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Output { .. })
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
