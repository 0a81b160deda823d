//! HTTP API module.
//!
//! This module provides the HTTP server and API types for the check-in backend.

pub mod server;
pub mod types;

pub use server::{process_upload, router, start_server, AppState};
pub use types::*;
