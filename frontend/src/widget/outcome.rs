//! Classification of an upload reply into a user-facing outcome.

use serde_json::Value;

use crate::types::{AppError, TransportResponse, UploadReply};

/// Status value the backend uses to flag an application-level failure.
pub const ERROR_SENTINEL: &str = "error";

/// Shown when `filenames` is missing or not a list of strings.
pub const UNKNOWN_FILES: &str = "unknown files";

/// Shown when submit is pressed with both inputs empty.
pub const NO_FILES_NOTICE: &str = "Please select at least one file to upload.";

/// Result of one submission.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadOutcome {
    Success {
        /// Processed file names; `None` when the reply had no usable list
        filenames: Option<Vec<String>>,
        /// Check-in identifier
        record_id: Option<String>,
    },
    Failure(AppError),
}

impl UploadOutcome {
    /// Classify a completed HTTP exchange.
    pub fn from_response(response: TransportResponse) -> Self {
        if !response.ok() {
            let detail = if response.body.is_empty() {
                response.status_text
            } else {
                response.body
            };
            return UploadOutcome::Failure(AppError::Server {
                status: response.status,
                detail,
            });
        }

        let reply: UploadReply = match serde_json::from_str(&response.body) {
            Ok(reply) => reply,
            Err(e) => {
                return UploadOutcome::Failure(AppError::Network(format!(
                    "Failed to parse response: {}",
                    e
                )))
            }
        };

        Self::from_reply(reply)
    }

    /// Classify a parsed payload from a 2xx response.
    pub fn from_reply(reply: UploadReply) -> Self {
        if reply.status.as_ref().and_then(Value::as_str) == Some(ERROR_SENTINEL) {
            let message = reply
                .message
                .as_ref()
                .map(render_text)
                .unwrap_or_else(|| "no message provided".to_string());
            return UploadOutcome::Failure(AppError::Logic(message));
        }

        UploadOutcome::Success {
            filenames: reply.filenames.as_ref().and_then(string_list),
            record_id: reply.record_id.as_ref().and_then(record_id_text),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }

    /// Text of the notice shown to the user.
    pub fn notice(&self) -> String {
        match self {
            UploadOutcome::Success {
                filenames,
                record_id,
            } => {
                let files = filenames
                    .as_ref()
                    .map(|names| names.join(", "))
                    .unwrap_or_else(|| UNKNOWN_FILES.to_string());
                let id = record_id
                    .as_ref()
                    .map(|id| format!(" (Check-in ID: {})", id))
                    .unwrap_or_default();
                format!("Upload successful!\nProcessed: {}{}", files, id)
            }
            UploadOutcome::Failure(error) => format!("Upload failed: {}", error),
        }
    }
}

fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Empty strings, zero, `false` and `null` count as "no id".
fn record_id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> TransportResponse {
        TransportResponse {
            status,
            status_text: "Internal Server Error".into(),
            body: body.into(),
        }
    }

    #[test]
    fn test_http_failure_includes_status_and_body() {
        let outcome = UploadOutcome::from_response(response(500, "boom"));
        assert_eq!(
            outcome.notice(),
            "Upload failed: Server HTTP Error (500): boom"
        );
    }

    #[test]
    fn test_http_failure_falls_back_to_status_text() {
        let outcome = UploadOutcome::from_response(response(500, ""));
        assert!(outcome.notice().contains("(500): Internal Server Error"));
    }

    #[test]
    fn test_error_sentinel_reports_message() {
        let body = r#"{"status": "error", "message": "Please upload at least 2 images (front and back)."}"#;
        let outcome = UploadOutcome::from_response(response(200, body));
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.notice(),
            "Upload failed: Server Logic Error: Please upload at least 2 images (front and back)."
        );
    }

    #[test]
    fn test_success_joins_filenames_and_id() {
        let body = r#"{"status": "success", "filenames": ["a.jpg", "b.jpg"], "record_id": "42"}"#;
        let outcome = UploadOutcome::from_response(response(200, body));
        assert!(outcome.is_success());
        assert_eq!(
            outcome.notice(),
            "Upload successful!\nProcessed: a.jpg, b.jpg (Check-in ID: 42)"
        );
    }

    #[test]
    fn test_numeric_record_id() {
        let body = r#"{"status": "success", "filenames": ["a.jpg"], "record_id": 7}"#;
        let outcome = UploadOutcome::from_response(response(200, body));
        assert!(outcome.notice().ends_with("(Check-in ID: 7)"));
    }

    #[test]
    fn test_malformed_filenames_use_placeholder() {
        let body = r#"{"status": "success", "filenames": "a.jpg"}"#;
        let outcome = UploadOutcome::from_response(response(200, body));
        assert_eq!(outcome.notice(), "Upload successful!\nProcessed: unknown files");

        let body = r#"{"status": "success", "filenames": ["a.jpg", 3]}"#;
        let outcome = UploadOutcome::from_response(response(200, body));
        assert!(outcome.notice().contains(UNKNOWN_FILES));
    }

    #[test]
    fn test_falsy_record_id_is_omitted() {
        for id in [r#""""#, "0", "null", "false"] {
            let body = format!(r#"{{"status": "success", "filenames": [], "record_id": {}}}"#, id);
            let outcome = UploadOutcome::from_response(response(200, &body));
            assert!(!outcome.notice().contains("Check-in ID"), "id {}", id);
        }
    }

    #[test]
    fn test_invalid_json_is_network_failure() {
        let outcome = UploadOutcome::from_response(response(200, "<html>"));
        match outcome {
            UploadOutcome::Failure(AppError::Network(msg)) => {
                assert!(msg.starts_with("Failed to parse response"))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
