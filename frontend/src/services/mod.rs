//! Browser services.
//!
//! # Services
//!
//! - [`upload`] - multipart upload to the check-in backend
//! - [`notify`] - alert notices and the page-wide error hook

pub mod upload;
pub mod notify;

pub use upload::*;
pub use notify::*;
