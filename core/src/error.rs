//! Structured error types for prcoach
//!
//! Covers the state store and configuration boundaries. Widget operations
//! themselves are total: a bad submission is ignored, never an error.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for prcoach operations
#[derive(Error, Debug)]
pub enum CoachError {
    // =========================================================================
    // State Persistence Errors
    // =========================================================================
    /// System data directory could not be located
    #[error("could not find data directory")]
    DataDirUnavailable,

    /// State file exists but could not be read
    #[error("state read failed: {path}")]
    StateReadFailed { path: PathBuf },

    /// State file holds something other than a JSON object
    #[error("state file corrupted: {path}")]
    StateCorrupted { path: PathBuf },

    /// State file could not be written
    #[error("state write failed: {path}")]
    StateWriteFailed { path: PathBuf },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// System config directory could not be located
    #[error("could not find config directory")]
    ConfigDirUnavailable,

    /// Config file did not parse or failed validation
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    // =========================================================================
    // External Error Wrappers
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convert from serde_json::Error to CoachError
impl From<serde_json::Error> for CoachError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias using CoachError
pub type Result<T> = std::result::Result<T, CoachError>;
