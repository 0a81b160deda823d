//! Error types for the check-in backend.
//!
//! - [`ExtractError`] - identity extraction (Gemini) errors
//! - [`StoreError`] - record store errors
//! - [`ServerError`] - top-level server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Extraction Errors
// =============================================================================

/// Errors while extracting identity details from document images.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Missing API key.
    #[error("Missing GEMINI_API_KEY environment variable")]
    MissingApiKey,

    /// No images to extract from.
    #[error("No images provided")]
    NoImages,

    /// Failed to read an image file.
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The API answered with an error.
    #[error("API error: {0}")]
    Api(String),

    /// The model output could not be parsed.
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors from the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server and CLI errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Extraction error.
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Failed to bind or serve.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
