/*!
 * Error types for the doctrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors detected while validating a translation request, before any remote call
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No target language was configured
    #[error("at least one target language is required")]
    NoTargetLanguages,

    /// Inline document content was supplied without a MIME type
    #[error("a MIME type is required for inline document content")]
    MissingMimeType,

    /// Both inline content and a storage input pattern were supplied
    #[error("inline document content and a storage input pattern are mutually exclusive")]
    AmbiguousInput,

    /// Neither inline content nor a storage input pattern was supplied
    #[error("no document input was provided")]
    MissingInput,

    /// Batch input was configured without an output location
    #[error("batch translation requires an output location prefix")]
    MissingOutputPrefix,

    /// No project identifier was configured
    #[error("project identifier is not set")]
    MissingProject,
}

/// Errors that can occur when talking to the translation service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Error establishing or maintaining a connection, including rejected credentials
    #[error("transport failure: {0}")]
    Transport(String),

    /// Failure reported by the service itself, surfaced verbatim
    #[error("service error: [{code}] {message}")]
    Service {
        /// Canonical status code reported by the service
        code: i32,
        /// Error message from the service
        message: String,
    },

    /// A terminal payload that does not match the expected shape
    #[error("failed to decode operation result: {0}")]
    Decode(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("file error: {0}")]
    File(String),

    /// Error from request validation
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the translation service
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Any other error
    #[error("unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
