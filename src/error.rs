//! Domain-specific error types for floatchat

use thiserror::Error;

/// Main error type for the service, client and configuration layers.
///
/// The response engine itself never fails; these errors only describe the
/// code around it.
#[derive(Error, Debug)]
pub enum FloatChatError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("Timeout error: {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl FloatChatError {
    /// Short stable label, used in log fields and HTTP error bodies.
    pub fn label(&self) -> &'static str {
        match self {
            FloatChatError::Config { .. } => "config",
            FloatChatError::Backend { .. } => "backend",
            FloatChatError::Timeout { .. } => "timeout",
            FloatChatError::Serialization { .. } => "serialization",
            FloatChatError::Validation { .. } => "validation",
            FloatChatError::Internal { .. } => "internal",
        }
    }
}

impl From<anyhow::Error> for FloatChatError {
    fn from(err: anyhow::Error) -> Self {
        FloatChatError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FloatChatError {
    fn from(err: serde_json::Error) -> Self {
        FloatChatError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FloatChatError {
    fn from(err: toml::de::Error) -> Self {
        FloatChatError::Config {
            message: format!("Invalid TOML: {}", err),
        }
    }
}

impl From<reqwest::Error> for FloatChatError {
    fn from(err: reqwest::Error) -> Self {
        // Timeouts are mapped by the caller, which knows the configured budget.
        if err.is_decode() {
            return FloatChatError::Serialization {
                message: format!("Undecodable backend response: {}", err),
            };
        }
        FloatChatError::Backend {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

/// Result type alias for floatchat operations
pub type Result<T> = std::result::Result<T, FloatChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let mapped: FloatChatError = err.into();
        assert_eq!(mapped.label(), "serialization");
    }

    #[test]
    fn test_timeout_display() {
        let err = FloatChatError::Timeout {
            operation: "/api/chat/".into(),
            timeout_ms: 30_000,
        };
        assert_eq!(
            err.to_string(),
            "Timeout error: /api/chat/ timed out after 30000ms"
        );
    }
}
