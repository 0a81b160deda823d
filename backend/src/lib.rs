//! # Check-in - identity document upload backend
//!
//! Receives the front and back images of an identity document, reads the
//! identity fields with Gemini and stores them as a check-in record.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Multipart  │────▶│  Extractor  │────▶│ RecordStore │────▶│ JSON reply  │
//! │ front/back  │     │  (Gemini)   │     │ (JSON file) │     │ record_id   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use checkin::{AppState, GeminiClient, RecordStore, Settings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = Settings::from_env();
//!     let client = GeminiClient::from_settings(&settings).unwrap();
//!     let store = RecordStore::open(&settings.store_path).unwrap();
//!     let state = AppState::new(Arc::new(client), store);
//!     checkin::server::start_server(8000, state, None).await.unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Environment settings
//! - [`logs`] - Console logging helpers
//! - [`models`] - Identity details and stored records
//! - [`extract`] - Gemini-backed extraction
//! - [`store`] - Record store
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod config;
pub mod logs;
pub mod models;

// Extraction
pub mod extract;

// Storage
pub mod store;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ExtractError, ServerError, StoreError};
pub use config::Settings;
pub use models::{parse_date, IdentityDetails, StoredRecord};
pub use extract::{Extractor, GeminiClient, UnconfiguredExtractor, UploadedImage};
pub use store::RecordStore;
pub use api::{process_upload, AppState, UploadReply};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
