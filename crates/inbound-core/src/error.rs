//! Error types for the Inbound application.

use thiserror::Error;

/// Message shown when a query fails local validation.
pub const VALIDATION_MESSAGE: &str =
    "Please provide a client name or category, and select at least one search platform.";

/// A shared error type for the entire Inbound application.
///
/// The first three variants are the failure modes of a lead search; the rest
/// cover storage and configuration. Every variant is terminal for the action
/// that raised it and never leaves partial results behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InboundError {
    /// The query was rejected before any backend call.
    #[error("{0}")]
    Validation(String),

    /// Transport failure or non-success reply from the generative backend.
    #[error("{message}")]
    Backend {
        status_code: Option<u16>,
        message: String,
    },

    /// The backend replied but its text is not a usable lead array.
    #[error("Could not parse results from the AI response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InboundError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates the standard validation error for an incomplete query.
    pub fn invalid_query() -> Self {
        Self::Validation(VALIDATION_MESSAGE.to_string())
    }

    /// Creates a Backend error
    pub fn backend(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Backend {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a MalformedResponse error that keeps the raw text for diagnostics.
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    /// Raw backend text attached to a `MalformedResponse`, if any.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for InboundError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for InboundError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for InboundError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for InboundError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, InboundError>`.
pub type Result<T> = std::result::Result<T, InboundError>;
