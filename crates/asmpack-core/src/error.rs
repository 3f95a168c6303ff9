//! Error types for asmpack

use thiserror::Error;

/// The main error type for asmpack operations
#[derive(Debug, Error)]
pub enum AsmpackError {
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Failed to parse descriptor {path}: {message}")]
    DescriptorParse { path: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Manifest error: {0}")]
    ManifestError(String),
}

/// Result type alias for asmpack operations
pub type Result<T> = std::result::Result<T, AsmpackError>;
