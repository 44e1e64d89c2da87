//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating endpoint configuration.
///
/// All of these are fatal at startup; monitoring never begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File '{}' not found.", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} file. {message}")]
    Parse { format: &'static str, message: String },

    #[error("endpoint #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("endpoint '{name}' has invalid URL '{url}': must start with http:// or https://")]
    InvalidUrl { name: String, url: String },

    #[error("endpoint '{name}' has invalid method '{method}': must be alphabetic")]
    InvalidMethod { name: String, method: String },

    #[error("endpoint '{name}' has invalid header '{header}'")]
    InvalidHeader { name: String, header: String },

    #[error("configuration contains no endpoints")]
    NoEndpoints,
}
