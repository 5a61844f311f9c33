/*!
 * Error types for the tradoc application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur while a document moves through the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The backend health probe failed before any unit was sent
    #[error("Translation backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A per-unit generate call failed; remaining units are abandoned
    #[error("Backend error: {0}")]
    Backend(#[from] ProviderError),

    /// A document could not be read or its output could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input path has no usable file name
    #[error("Invalid document path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while persisting the translation cache
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cache file could not be written back to disk
    #[error("Failed to persist cache: {0}")]
    PersistFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the translation backend
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the document pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Error from the cache layer
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Any other error
    #[error("Unknown error: {0}")]
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
