//! Error types for formwork configuration and layout loading

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested file does not exist
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a file from disk
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Merging or extracting the layered configuration failed
    #[error("Failed to parse configuration: {source}")]
    ParseError { source: Box<figment::Error> },

    /// A layout description file could not be parsed
    #[error("Invalid layout file {path}: {source}")]
    Layout {
        path: PathBuf,
        source: formwork_layout::FormError,
    },

    /// File extension is not one of toml, yaml, yml, json
    #[error("Unsupported file format: {format}")]
    UnsupportedFormat { format: String },
}

impl ConfigError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn layout(path: impl Into<PathBuf>, source: formwork_layout::FormError) -> Self {
        ConfigError::Layout {
            path: path.into(),
            source,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}
