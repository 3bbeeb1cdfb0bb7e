//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Data parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a parse error with message
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Text shown inline in a panel for this failure.
    ///
    /// Backend-provided `error` messages and local validation messages are shown
    /// as-is; everything else collapses to the caller's static `fallback`.
    pub fn display_text(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Validation(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_prefers_api_message() {
        let err = AppError::Api {
            status: 400,
            message: "department name is required".to_string(),
        };
        assert_eq!(err.display_text("error creating department"), "department name is required");
    }

    #[test]
    fn test_display_text_falls_back_for_transport_errors() {
        let err = AppError::parse("unexpected body");
        assert_eq!(err.display_text("error deleting vacancy"), "error deleting vacancy");

        let err = AppError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.display_text("error deleting vacancy"), "error deleting vacancy");
    }

    #[test]
    fn test_display_text_shows_validation() {
        let err = AppError::validation("Name is required");
        assert_eq!(err.display_text("ignored"), "Name is required");
    }
}
