//! Global error handling for snapfs
//!
//! Only configuration loading is allowed to abort a run. Everything the engine
//! hits after that (missing paths, unreadable files, bad notebook JSON) is
//! recovered locally and surfaced in the rendered output instead.

use std::io;

use thiserror::Error;

/// Global error type for snapfs operations
#[derive(Error, Debug)]
pub enum SnapFsError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// JSON processing errors (notebook parsing)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Malformed tree text handed to the path-list parser
    #[error("Tree parse error: {0}")]
    TreeParse(String),
}

/// Specialized Result type for snapfs operations
pub type Result<T> = std::result::Result<T, SnapFsError>;
