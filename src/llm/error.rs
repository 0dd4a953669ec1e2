//! LLM backend errors
//!
//! Failures talking to the model endpoint. These are always fatal to the
//! request that triggered them; nothing in the crate retries a chat call.

use std::fmt;

/// Errors that can occur while exchanging messages with an LLM backend
#[derive(Debug, Clone)]
pub enum BackendError {
    /// API request failed with the given message
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Request timed out after the specified duration (in seconds)
    TimeoutError { seconds: u64 },

    /// Configuration error (missing API keys, invalid settings, etc.)
    ConfigurationError { message: String },

    /// Generic error for other cases
    Other { message: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ApiError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "API error ({}): {}", code, message)
                } else {
                    write!(f, "API error: {}", message)
                }
            }
            BackendError::TimeoutError { seconds } => {
                write!(f, "Request timed out after {} seconds", seconds)
            }
            BackendError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            BackendError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status() {
        let error = BackendError::ApiError {
            message: "model overloaded".to_string(),
            status_code: Some(503),
        };
        assert_eq!(error.to_string(), "API error (503): model overloaded");
    }

    #[test]
    fn test_api_error_display_without_status() {
        let error = BackendError::ApiError {
            message: "connection reset".to_string(),
            status_code: None,
        };
        assert_eq!(error.to_string(), "API error: connection reset");
    }

    #[test]
    fn test_timeout_display() {
        let error = BackendError::TimeoutError { seconds: 120 };
        assert!(error.to_string().contains("120 seconds"));
    }

    #[test]
    fn test_configuration_and_other_display() {
        let config = BackendError::ConfigurationError {
            message: "model name cannot be empty".to_string(),
        };
        assert_eq!(
            config.to_string(),
            "Configuration error: model name cannot be empty"
        );

        let other = BackendError::Other {
            message: "no queued response".to_string(),
        };
        assert_eq!(other.to_string(), "Error: no queued response");
    }
}
