//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Selection Types** - files picked in the two inputs
//! - **API Types** - transport reply and backend payload
//! - **Error Types** - frontend error handling

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

// =============================================================================
// Selection Types
// =============================================================================

/// A file picked in one of the two inputs.
///
/// `B` is the opaque binary handle: a `web_sys::File` in the browser, plain
/// bytes in tests.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile<B> {
    /// File name as reported by the picker
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Binary content
    pub blob: B,
}

impl<B> SelectedFile<B> {
    pub fn new(name: impl Into<String>, size: u64, blob: B) -> Self {
        Self {
            name: name.into(),
            size,
            blob,
        }
    }
}

// =============================================================================
// API Types
// =============================================================================

/// Raw HTTP reply as seen by the widget, before classification.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// HTTP reason phrase
    pub status_text: String,
    /// Response body, read as text
    pub body: String,
}

impl TransportResponse {
    /// Whether the status code is in the 2xx range.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSON payload returned by the upload endpoint.
///
/// Fields are kept loosely typed: the widget only trusts them after
/// checking their shape.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UploadReply {
    /// "success" or "error"
    #[serde(default)]
    pub status: Option<Value>,
    /// Human readable message, used on error
    #[serde(default)]
    pub message: Option<Value>,
    /// Names of the processed files
    #[serde(default)]
    pub filenames: Option<Value>,
    /// Check-in identifier, string or number
    #[serde(default)]
    pub record_id: Option<Value>,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// Request could not be completed or its body could not be read.
    Network(String),
    /// Server answered with a non-2xx status.
    Server { status: u16, detail: String },
    /// Server answered 2xx but flagged the request as failed.
    Logic(String),
    /// Required page element is missing.
    Dom(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server { status, detail } => {
                write!(f, "Server HTTP Error ({}): {}", status, detail)
            }
            AppError::Logic(msg) => write!(f, "Server Logic Error: {}", msg),
            AppError::Dom(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
