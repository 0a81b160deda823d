//! REST API types for frontend integration.
//!
//! Upload outcomes are reported in the body with HTTP 200; `status` is
//! `"success"` or `"error"`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::{IdentityDetails, StoredRecord};

/// Status value for a processed upload.
pub const STATUS_SUCCESS: &str = "success";

/// Status value for a failed upload.
pub const STATUS_ERROR: &str = "error";

/// Message when fewer than two images arrive.
pub const MIN_FILES_MESSAGE: &str = "Please upload at least 2 images (front and back).";

/// Message on a saved record.
pub const SAVED_MESSAGE: &str = "Data saved to database!";

/// Response sent to the frontend after an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReply {
    /// "success" or "error"
    pub status: String,

    /// Human readable outcome
    pub message: String,

    /// Check-in ID of the saved record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<u64>,

    /// Fields read from the images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<IdentityDetails>,

    /// Names of the processed images, front first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filenames: Option<Vec<String>>,
}

impl UploadReply {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: message.into(),
            record_id: None,
            extracted_data: None,
            filenames: None,
        }
    }

    pub fn saved(record: &StoredRecord, details: IdentityDetails) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: SAVED_MESSAGE.to_string(),
            record_id: Some(record.id),
            extracted_data: Some(details),
            filenames: Some(record.filenames.clone()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == STATUS_ERROR
    }
}

/// Create an error response for requests rejected before processing
pub fn error_response(error: &str) -> Value {
    json!({
        "status": STATUS_ERROR,
        "message": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reply_omits_success_fields() {
        let value = serde_json::to_value(UploadReply::error(MIN_FILES_MESSAGE)).unwrap();
        assert_eq!(
            value,
            json!({"status": "error", "message": MIN_FILES_MESSAGE})
        );
    }

    #[test]
    fn test_saved_reply_shape() {
        let details = IdentityDetails {
            full_name: Some("Asha Rao".into()),
            ..Default::default()
        };
        let record = StoredRecord::new(42, &details, vec!["a.jpg".into(), "b.jpg".into()]);
        let value = serde_json::to_value(UploadReply::saved(&record, details)).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["record_id"], 42);
        assert_eq!(value["filenames"], json!(["a.jpg", "b.jpg"]));
        assert_eq!(value["extracted_data"]["full_name"], "Asha Rao");
    }
}
