//! Error types for etch-bend-lines

use std::io;
use thiserror::Error;

/// Main error type for etch-bend-lines operations
#[derive(Debug, Error)]
pub enum EtchError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing the DXF file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// A configuration value could not be used
    #[error("Invalid value for setting '{name}': {value}")]
    InvalidSetting { name: String, value: String },

    /// The settings file is not valid JSON
    #[error("Settings file error: {0}")]
    Json(#[from] serde_json::Error),

    /// Entity handle not present in the drawing
    #[error("Entity not found: handle {0:#X}")]
    EntityNotFound(u64),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl EtchError {
    /// Build an [`EtchError::InvalidSetting`] for a named setting
    pub fn invalid_setting(name: impl Into<String>, value: impl ToString) -> Self {
        EtchError::InvalidSetting {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

/// Result type alias for etch-bend-lines operations
pub type Result<T> = std::result::Result<T, EtchError>;

impl From<String> for EtchError {
    fn from(s: String) -> Self {
        EtchError::Custom(s)
    }
}

impl From<&str> for EtchError {
    fn from(s: &str) -> Self {
        EtchError::Custom(s.to_string())
    }
}
