//! Check-in - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading the front and back of an identity
//! document and receiving a check-in ID.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Hero (title, description)                                   │
//! │  CheckInForm ── UploadWidget ── FetchTransport ──▶ backend   │
//! │                      └───────── AlertNotifier                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Selected files, replies, errors
//! - [`format`] - Byte count rendering
//! - [`widget`] - Upload state machine and its capabilities
//! - [`components`] - UI components
//! - [`services`] - Browser transport and notices

use leptos::*;
use leptos_meta::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod format;
pub mod widget;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Selection
    SelectedFile,
    // API
    TransportResponse, UploadReply,
    // Errors
    AppError, AppResult,
};

// Formatting
pub use format::{format_bytes, selection_label};

// Widget
pub use widget::{SubmitState, UploadOutcome, UploadWidget};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install hooks, mount the app and check the rendered page.
///
/// Called once from the binary's `main`.
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    install_global_error_hook();

    log::info!("🦀 Check-in - Starting Leptos App");

    mount_to_body(|| view! { <App/> });

    let document = web_sys::window().and_then(|w| w.document());
    widget::verify_submit_button(
        |id| {
            document
                .as_ref()
                .and_then(|d| d.get_element_by_id(id))
                .is_some()
        },
        &AlertNotifier,
    );
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Get Check-in ID"/>
        <main>
            <MainContent/>
        </main>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    view! {
        <div class="container">
            <Hero/>
            <CheckInForm/>
        </div>

        <Footer/>
    }
}
