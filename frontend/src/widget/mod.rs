//! The upload widget.
//!
//! Reflects file selections into status labels and runs the submit state
//! machine:
//!
//! ```text
//! Idle ─▶ Validating ─┬─▶ Aborted ───────────────────────────────▶ Idle
//!                     └─▶ Submitting ─┬─▶ Success      ─┐
//!                                     ├─▶ ServerError  ─┼─ cleanup ─▶ Idle
//!                                     └─▶ NetworkError ─┘
//! ```
//!
//! All state lives on the UI thread; interior mutability is plain [`Cell`].

mod capabilities;
mod outcome;

use std::cell::Cell;

use crate::config::{PROCESSING_LABEL, SUBMIT_BUTTON_ID, SUBMIT_LABEL, UPLOAD_FIELD, UPLOAD_URL};
use crate::format::selection_label;
use crate::types::AppError;

pub use capabilities::*;
pub use outcome::*;

/// Terminal state of one submit activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitState {
    /// A previous submission was still in flight.
    Ignored,
    /// No file selected; nothing was sent.
    Aborted,
    Success,
    ServerError,
    NetworkError,
}

/// An input together with the label that describes it.
pub struct Side<S, L> {
    pub input: S,
    pub label: L,
}

impl<S, L> Side<S, L> {
    pub fn new(input: S, label: L) -> Self {
        Self { input, label }
    }
}

/// Front/back document upload widget.
pub struct UploadWidget<S, L, C, N, T> {
    front: Side<S, L>,
    back: Side<S, L>,
    submit: C,
    notifier: N,
    transport: T,
    endpoint: String,
    in_flight: Cell<bool>,
}

impl<S, L, C, N, T> UploadWidget<S, L, C, N, T>
where
    S: FileSlot,
    L: StatusLabel,
    C: SubmitControl,
    N: Notifier,
    T: UploadTransport<Blob = S::Blob>,
{
    pub fn new(front: Side<S, L>, back: Side<S, L>, submit: C, notifier: N, transport: T) -> Self {
        Self {
            front,
            back,
            submit,
            notifier,
            transport,
            endpoint: UPLOAD_URL.to_string(),
            in_flight: Cell::new(false),
        }
    }

    /// Post to a different endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.get()
    }

    /// Handle a change event on the front input.
    pub fn front_changed(&self) {
        log::debug!("Front file changed");
        Self::reflect(&self.front);
    }

    /// Handle a change event on the back input.
    pub fn back_changed(&self) {
        log::debug!("Back file changed");
        Self::reflect(&self.back);
    }

    fn reflect(side: &Side<S, L>) {
        if let Some(file) = side.input.selected() {
            side.label.set_text(&selection_label(&file.name, file.size));
        }
    }

    /// Handle a submit activation.
    ///
    /// Activations arriving while a request is in flight are ignored.
    pub async fn submit(&self) -> SubmitState {
        if self.in_flight.get() {
            log::warn!("Submit ignored: an upload is already in progress");
            return SubmitState::Ignored;
        }

        let files: Vec<_> = [self.front.input.selected(), self.back.input.selected()]
            .into_iter()
            .flatten()
            .collect();

        if files.is_empty() {
            self.notifier.notify(NO_FILES_NOTICE);
            return SubmitState::Aborted;
        }

        let _busy = BusyGuard::engage(&self.submit, &self.in_flight);

        log::info!("📤 Uploading {} file(s) to {}", files.len(), self.endpoint);
        let outcome = match self
            .transport
            .post_multipart(&self.endpoint, UPLOAD_FIELD, &files)
            .await
        {
            Ok(response) => {
                log::debug!("HTTP response status: {}", response.status);
                UploadOutcome::from_response(response)
            }
            Err(e) => UploadOutcome::Failure(e),
        };

        let state = match &outcome {
            UploadOutcome::Success { .. } => SubmitState::Success,
            UploadOutcome::Failure(AppError::Network(_)) => SubmitState::NetworkError,
            UploadOutcome::Failure(_) => SubmitState::ServerError,
        };

        if outcome.is_success() {
            log::info!("✅ Upload successful");
        } else {
            log::error!("❌ Upload failed: {:?}", outcome);
        }
        self.notifier.notify(&outcome.notice());

        state
    }
}

/// Disables the submit control for its lifetime.
///
/// Restoring happens in `Drop`, so the control comes back on every exit
/// path of [`UploadWidget::submit`], including a dropped future.
struct BusyGuard<'a, C: SubmitControl> {
    control: &'a C,
    in_flight: &'a Cell<bool>,
}

impl<'a, C: SubmitControl> BusyGuard<'a, C> {
    fn engage(control: &'a C, in_flight: &'a Cell<bool>) -> Self {
        in_flight.set(true);
        control.set_enabled(false);
        control.set_label(PROCESSING_LABEL);
        Self { control, in_flight }
    }
}

impl<C: SubmitControl> Drop for BusyGuard<'_, C> {
    fn drop(&mut self) {
        self.control.set_enabled(true);
        self.control.set_label(SUBMIT_LABEL);
        self.in_flight.set(false);
    }
}

/// Check that the host page carries the submit button.
///
/// Reports a missing button through `notifier` and returns `false`; the
/// caller keeps running in a degraded state.
pub fn verify_submit_button(has_element: impl Fn(&str) -> bool, notifier: &impl Notifier) -> bool {
    if has_element(SUBMIT_BUTTON_ID) {
        log::debug!("Submit button found");
        return true;
    }
    log::error!("Submit button not found!");
    let error = AppError::Dom("Submit button not found in HTML.".to_string());
    notifier.notify(&error.to_string());
    false
}
