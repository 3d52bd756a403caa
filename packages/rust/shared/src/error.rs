//! Error types for pagegen.
//!
//! Library crates use [`PageGenError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all pagegen operations.
#[derive(Debug, thiserror::Error)]
pub enum PageGenError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error talking to the text-generation service.
    #[error("network error: {0}")]
    Network(String),

    /// The text-generation service answered, but without usable content.
    #[error("generation error: {0}")]
    Generation(String),

    /// The generated question set was not a well-formed JSON object.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Parser error message.
        message: String,
        /// Leading slice of the offending response text.
        excerpt: String,
    },

    /// A required key is absent from the raw product record.
    #[error("missing field: {key:?}")]
    MissingField { key: String },

    /// A raw product key holds a value of the wrong JSON type.
    #[error("invalid field {key:?}: expected {expected}")]
    InvalidField { key: String, expected: &'static str },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad input file, serialization failure, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PageGenError>;

impl PageGenError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a missing-field error for a raw product key.
    pub fn missing_field(key: impl Into<String>) -> Self {
        Self::MissingField { key: key.into() }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PageGenError::config("missing API key");
        assert_eq!(err.to_string(), "config error: missing API key");

        let err = PageGenError::missing_field("Price");
        assert_eq!(err.to_string(), r#"missing field: "Price""#);

        let err = PageGenError::InvalidField {
            key: "Benefits".into(),
            expected: "array of strings",
        };
        assert!(err.to_string().contains("array of strings"));
    }

    #[test]
    fn malformed_response_hides_excerpt_from_display() {
        let err = PageGenError::MalformedResponse {
            message: "expected value at line 1 column 1".into(),
            excerpt: "Sorry, I cannot help.".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed response: expected value at line 1 column 1"
        );
    }
}
