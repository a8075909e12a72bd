//! Error type shared by every configuration operation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{operation} is not yet supported")]
    UnsupportedOperation { operation: String },

    #[error("unsupported configuration scope descriptor (expected an object with a string `languageId`): {descriptor}")]
    UnsupportedScopeDescriptor { descriptor: String },

    #[error("invalid configuration path '{section}': a key is required")]
    InvalidPath { section: String },

    #[error("cannot write '{section}': segment '{segment}' holds a value, not a section")]
    PathConflict { section: String, segment: String },

    #[error("failed to (de)serialize configuration snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("failed to parse TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration mismatch\nexpected ({expected_fingerprint}):\n{expected}\nactual ({actual_fingerprint}):\n{actual}")]
    Mismatch {
        expected: String,
        expected_fingerprint: String,
        actual: String,
        actual_fingerprint: String,
    },
}

impl ConfigError {
    pub(crate) fn unsupported(operation: impl Into<String>) -> Self {
        ConfigError::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
