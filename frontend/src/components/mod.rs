//! UI Components for the check-in application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`CheckInForm`] - Front/back image upload bound to the upload widget

mod hero;
mod upload;
mod footer;

pub use hero::*;
pub use upload::*;
pub use footer::*;
