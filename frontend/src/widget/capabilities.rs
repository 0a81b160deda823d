//! Capabilities the upload widget depends on.
//!
//! The widget never touches the DOM directly. The browser binding in
//! [`crate::components`] implements these traits with Leptos signals and
//! `web_sys` handles; tests implement them with capturing stubs.

use async_trait::async_trait;

use crate::types::{AppResult, SelectedFile, TransportResponse};

/// One file input.
pub trait FileSlot {
    /// Binary handle of the selected file.
    type Blob;

    /// First selected file, if any.
    fn selected(&self) -> Option<SelectedFile<Self::Blob>>;
}

/// A text element showing the state of one input.
pub trait StatusLabel {
    fn set_text(&self, text: &str);
}

/// The submit button.
pub trait SubmitControl {
    fn set_enabled(&self, enabled: bool);
    fn set_label(&self, label: &str);
}

/// Blocking user notice.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Sends one multipart POST.
///
/// Every file goes under `field`, in slice order. Errors are reserved for
/// requests that did not complete; any HTTP status is a successful send.
#[async_trait(?Send)]
pub trait UploadTransport {
    type Blob;

    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        files: &[SelectedFile<Self::Blob>],
    ) -> AppResult<TransportResponse>;
}
