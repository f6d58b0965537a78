//! Layered error definitions
//!
//! Categorized by source: config / validation / transport / invocation

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Dispatch Validation Errors =====
    /// Inbound event carried an empty payload
    #[error("no message to send")]
    EmptyPayload,

    // ===== Transport Errors =====
    /// Transport-level failure (connect / timeout / protocol) before a
    /// response status was obtained
    #[error("transport error calling '{url}': {message}")]
    Transport { url: String, message: String },

    /// In-flight exchange aborted by the dispatch context token
    #[error("invocation of '{url}' cancelled")]
    Cancelled { url: String },

    // ===== Invocation Errors =====
    /// Per-target failure, wrapping the transport cause with the function
    /// identifier for diagnostic context
    #[error("unable to invoke {function}")]
    Invocation {
        function: String,
        #[source]
        source: Box<ContractError>,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create transport error
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Wrap a failure with the function identifier it occurred for
    pub fn invocation(function: impl Into<String>, source: ContractError) -> Self {
        Self::Invocation {
            function: function.into(),
            source: Box::new(source),
        }
    }

    /// True for transport-class failures (including cancellation), which the
    /// dispatcher surfaces with the synthetic 503 status
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Cancelled { .. })
    }
}
