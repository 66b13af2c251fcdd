// src/error.rs

//! Unified error handling for the downloads hub.

use std::fmt;

use thiserror::Error;

/// Result type alias for hub operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Manifest document is unusable
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Downloaded content does not match the published hash
    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    Checksum {
        path: String,
        expected: String,
        actual: String,
    },
}

impl AppError {
    /// Create a manifest error.
    pub fn manifest(message: impl fmt::Display) -> Self {
        Self::Manifest(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Whether this error came from loading the manifest resource.
    ///
    /// These are the failures the browser surfaces as a single terminal
    /// "failed to load" message.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::Manifest(_) | Self::Http(_) | Self::HttpStatus { .. } | Self::Json(_) | Self::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failures_are_classified() {
        assert!(AppError::manifest("not an object").is_load_failure());
        assert!(
            AppError::HttpStatus {
                url: "https://example.com/manifest.json".into(),
                status: 404,
            }
            .is_load_failure()
        );
        assert!(!AppError::config("bad").is_load_failure());
    }

    #[test]
    fn checksum_message_names_both_hashes() {
        let err = AppError::Checksum {
            path: "a/b.fd".into(),
            expected: "aa".into(),
            actual: "bb".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("a/b.fd"));
        assert!(msg.contains("expected aa"));
        assert!(msg.contains("got bb"));
    }
}
