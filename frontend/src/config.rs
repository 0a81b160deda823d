//! Application configuration.
//!
//! Centralized configuration for the check-in frontend. Values are
//! hardcoded; the upload endpoint can be overridden at build time with the
//! `CHECKIN_UPLOAD_URL` environment variable.

/// Upload endpoint the widget posts the document images to.
pub const UPLOAD_URL: &str = match option_env!("CHECKIN_UPLOAD_URL") {
    Some(url) => url,
    None => "https://idinsight-backend.onrender.com/file/upload",
};

/// Multipart field name shared by the front and back parts.
pub const UPLOAD_FIELD: &str = "files";

/// Element id of the front image input.
pub const FRONT_INPUT_ID: &str = "fileupload";

/// Element id of the back image input.
pub const BACK_INPUT_ID: &str = "bfile";

/// Element id of the front status label.
pub const FRONT_INFO_ID: &str = "frontFileInfo";

/// Element id of the back status label.
pub const BACK_INFO_ID: &str = "backFileInfo";

/// Element id of the submit button.
pub const SUBMIT_BUTTON_ID: &str = "submitBtn";

/// Submit button label while idle.
pub const SUBMIT_LABEL: &str = "Get Check-in ID";

/// Submit button label while a request is in flight.
pub const PROCESSING_LABEL: &str = "Processing...";

/// Status label text before any file is picked.
pub const NO_FILE_LABEL: &str = "No file selected";
