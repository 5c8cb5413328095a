//! Error types for sdm-core

use thiserror::Error;

/// Core error type for sdm
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Encoding label not recognized
    #[error("[C003] Unknown script encoding '{label}'")]
    UnknownEncoding { label: String },

    /// C004: Text contains characters the encoding cannot represent
    #[error("[C004] Text cannot be represented in {encoding}")]
    Unencodable { encoding: &'static str },

    /// C005: History table name is not a plain identifier
    #[error("[C005] Invalid table name '{name}': {reason}")]
    InvalidTableName { name: String, reason: &'static str },

    /// C006: IO error with file path context
    #[error("[C006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C007: YAML parse error
    #[error("[C007] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
