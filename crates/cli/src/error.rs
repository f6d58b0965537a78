//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration parsing error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    /// Inbound event could not be parsed
    #[error("Failed to parse event on line {line}: {message}")]
    EventParse { line: u64, message: String },

    /// Header argument was not KEY=VALUE
    #[error("Invalid header '{raw}', expected KEY=VALUE")]
    InvalidHeader { raw: String },

    /// Relay execution error
    #[error("Relay execution failed: {message}")]
    RelayExecution { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

#[allow(dead_code)]
impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn event_parse(line: u64, message: impl Into<String>) -> Self {
        Self::EventParse {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_header(raw: impl Into<String>) -> Self {
        Self::InvalidHeader { raw: raw.into() }
    }

    pub fn relay_execution(message: impl Into<String>) -> Self {
        Self::RelayExecution {
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, CliError>;
