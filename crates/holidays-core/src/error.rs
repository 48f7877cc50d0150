//! Error types for the holidays service

use thiserror::Error;

/// Result type alias using the holidays Error
pub type Result<T> = std::result::Result<T, Error>;

/// Holidays error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Upstream errors (E100-E199)
    #[error("Holiday source unavailable: {message}")]
    UpstreamUnavailable {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Aggregation failed: {0}")]
    AggregationFailed(#[source] Box<Error>),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build an upstream failure wrapping a transport error
    pub fn upstream(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Build an upstream failure without an underlying transport error
    pub fn upstream_message(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a per-country failure raised inside a fan-out
    pub fn aggregation(cause: Error) -> Self {
        Self::AggregationFailed(Box::new(cause))
    }

    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::UpstreamUnavailable { .. } => "E100",
            Self::AggregationFailed(_) => "E101",
            Self::ConfigError(_) => "E600",
            Self::InvalidInput(_) => "E800",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UpstreamUnavailable { .. } => {
                Some("holidays config get upstream.base_url".to_string())
            }
            Self::AggregationFailed(cause) => cause.suggestion(),
            Self::ConfigError(_) => Some("holidays config show".to_string()),
            _ => None,
        }
    }

    /// Whether the failure originates from the upstream holiday source
    pub fn is_upstream_failure(&self) -> bool {
        match self {
            Self::UpstreamUnavailable { .. } => true,
            Self::AggregationFailed(cause) => cause.is_upstream_failure(),
            _ => false,
        }
    }

    /// Whether the failure comes from a request value the core refused
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::InvalidInput(_) => true,
            Self::AggregationFailed(cause) => cause.is_invalid_input(),
            _ => false,
        }
    }
}
