//! Identity extraction from document images.
//!
//! Sends the front and back images to the Gemini `generateContent` API and
//! parses the returned JSON into [`IdentityDetails`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkin::extract::{Extractor, GeminiClient, UploadedImage};
//!
//! let client = GeminiClient::new("api-key".to_string());
//! let images = vec![
//!     UploadedImage::from_path("front.jpg")?,
//!     UploadedImage::from_path("back.jpg")?,
//! ];
//! let details = client.extract(&images).await?;
//! ```

pub mod prompt;

use std::path::Path;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::config::{Settings, DEFAULT_MODEL};
use crate::error::{ExtractError, ExtractResult};
use crate::logs::{log_info_indent, log_success_indent};
use crate::models::IdentityDetails;

pub use prompt::extraction_prompt;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Header carrying the API key. The key must never appear in the URL:
/// request errors quote the URL and are relayed to uploaders.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// An uploaded image file.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub filename: String,
    /// MIME type sent by the client, if any
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(filename: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    /// Load an image from disk.
    pub fn from_path(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        Ok(Self::new(filename, None, bytes))
    }

    /// MIME type for the API: the client's if it sent an image type,
    /// otherwise guessed from the extension, defaulting to JPEG.
    pub fn mime_type(&self) -> String {
        if let Some(ct) = self.content_type.as_deref() {
            if ct.starts_with("image/") {
                return ct.to_string();
            }
        }
        let ext = self
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "webp" => "image/webp",
            "heic" => "image/heic",
            "heif" => "image/heif",
            _ => "image/jpeg",
        }
        .to_string()
    }
}

/// Reads identity details out of document images.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, images: &[UploadedImage]) -> ExtractResult<IdentityDetails>;
}

/// Stands in when no API key is configured; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredExtractor;

#[async_trait]
impl Extractor for UnconfiguredExtractor {
    async fn extract(&self, _images: &[UploadedImage]) -> ExtractResult<IdentityDetails> {
        Err(ExtractError::MissingApiKey)
    }
}

// =============================================================================
// Gemini API
// =============================================================================

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GeminiError {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Create a new client with explicit API key
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &Settings) -> ExtractResult<Self> {
        let api_key = settings
            .gemini_api_key
            .clone()
            .ok_or(ExtractError::MissingApiKey)?;
        Ok(Self::new(api_key).with_model(&settings.gemini_model))
    }

    /// Set the model to use
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Point the client at another models endpoint
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call_api(&self, request: &GeminiRequest) -> ExtractResult<String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        log_info_indent(format!("📡 Calling Gemini API ({})...", self.model), 1);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ExtractError::Http(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::Http(e.without_url().to_string()))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<GeminiError>(&body) {
                return Err(ExtractError::Api(error.error.message));
            }
            return Err(ExtractError::Api(format!("HTTP {}: {}", status, body)));
        }

        let response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| ExtractError::InvalidResponse(e.to_string()))?;

        let text = response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ExtractError::InvalidResponse("Empty response".to_string()));
        }

        log_success_indent(format!("Received {} bytes", text.len()), 1);
        Ok(text)
    }
}

#[async_trait]
impl Extractor for GeminiClient {
    async fn extract(&self, images: &[UploadedImage]) -> ExtractResult<IdentityDetails> {
        if images.is_empty() {
            return Err(ExtractError::NoImages);
        }
        let request = build_request(images);
        let text = self.call_api(&request).await?;
        parse_details(&text)
    }
}

fn build_request(images: &[UploadedImage]) -> GeminiRequest {
    let mut parts = vec![Part::Text {
        text: extraction_prompt().to_string(),
    }];
    parts.extend(images.iter().map(|image| Part::InlineData {
        inline_data: InlineData {
            mime_type: image.mime_type(),
            data: STANDARD.encode(&image.bytes),
        },
    }));

    GeminiRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            temperature: 0.1,
            response_mime_type: "application/json".to_string(),
        },
    }
}

/// Parse the model output into identity details.
pub fn parse_details(text: &str) -> ExtractResult<IdentityDetails> {
    let json = extract_json(text);
    serde_json::from_str(&json).map_err(|e| {
        ExtractError::InvalidResponse(format!(
            "{}. Response was: {}",
            e,
            text.chars().take(500).collect::<String>()
        ))
    })
}

/// Extract JSON from a response that may contain markdown code blocks
fn extract_json(text: &str) -> String {
    // Fenced block, with or without a language tag
    if let Some(start) = text.find("```") {
        let after_fence = start + 3;
        let content_start = text[after_fence..]
            .find('\n')
            .map(|i| after_fence + i + 1)
            .unwrap_or(after_fence);

        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim().to_string();
        }
    }

    // Raw object, possibly surrounded by prose
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return text[start..=end].to_string();
        }
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    #[test]
    fn test_extract_json_from_code_block() {
        let response = "```json\n{\"full_name\": \"Asha Rao\"}\n```";
        assert_eq!(extract_json(response), r#"{"full_name": "Asha Rao"}"#);
    }

    #[test]
    fn test_extract_json_with_prose() {
        let response = r#"Here you go: {"gender": "F"} Hope this helps."#;
        assert_eq!(extract_json(response), r#"{"gender": "F"}"#);
    }

    #[test]
    fn test_parse_details() {
        let response = r#"```json
{
    "full_name": "Asha Rao",
    "gender": "Female",
    "date_of_birth": "1990-08-15",
    "document_number": "1234 5678 9012",
    "address": "12 MG Road, Bengaluru"
}
```"#;
        let details = parse_details(response).unwrap();
        assert_eq!(details.full_name.as_deref(), Some("Asha Rao"));
        assert_eq!(details.document_number.as_deref(), Some("1234 5678 9012"));
    }

    #[test]
    fn test_parse_details_rejects_garbage() {
        let err = parse_details("I could not read the card").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidResponse(_)));
    }

    #[test]
    fn test_mime_type_guess() {
        let png = UploadedImage::new("card.PNG", None, vec![]);
        assert_eq!(png.mime_type(), "image/png");

        let declared = UploadedImage::new("card", Some("image/webp".into()), vec![]);
        assert_eq!(declared.mime_type(), "image/webp");

        let octet = UploadedImage::new("card.jpeg", Some("application/octet-stream".into()), vec![]);
        assert_eq!(octet.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_request_shape() {
        let images = vec![
            UploadedImage::new("front.jpg", None, b"front".to_vec()),
            UploadedImage::new("back.png", None, b"back".to_vec()),
        ];
        let value = serde_json::to_value(build_request(&images)).unwrap();
        let parts = value["contents"][0]["parts"].as_array().unwrap();

        assert_eq!(parts.len(), 3);
        assert!(parts[0]["text"].as_str().unwrap().contains("full_name"));
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[1]["inline_data"]["data"], STANDARD.encode(b"front"));
        assert_eq!(parts[2]["inline_data"]["mime_type"], "image/png");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_from_settings_requires_key() {
        let settings = Settings::from_lookup(|_| None);
        assert!(matches!(
            GeminiClient::from_settings(&settings),
            Err(ExtractError::MissingApiKey)
        ));

        let settings = Settings::from_lookup(|k| (k == "GEMINI_API_KEY").then(|| "key".to_string()));
        let client = GeminiClient::from_settings(&settings).unwrap();
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    const KEY: &str = "SECRET_KEY_123";

    fn images() -> Vec<UploadedImage> {
        vec![
            UploadedImage::new("front.jpg", None, b"front".to_vec()),
            UploadedImage::new("back.jpg", None, b"back".to_vec()),
        ]
    }

    /// Answers like `generateContent`, but only when the key arrives in the
    /// header and the query string is empty.
    async fn fake_gemini(headers: HeaderMap, uri: Uri) -> (StatusCode, Json<Value>) {
        let key_in_header = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) == Some(KEY);
        if !key_in_header || uri.query().is_some() {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": { "message": "API key not valid" } })),
            );
        }
        let text = "```json\n{\"full_name\": \"Asha Rao\", \"gender\": \"Female\"}\n```";
        (
            StatusCode::OK,
            Json(json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })),
        )
    }

    async fn serve_fake_gemini() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/{*path}", post(fake_gemini));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1beta/models", addr)
    }

    #[tokio::test]
    async fn test_key_sent_as_header() {
        let base = serve_fake_gemini().await;
        let client = GeminiClient::new(KEY.to_string()).with_base_url(&base);

        let details = client.extract(&images()).await.unwrap();
        assert_eq!(details.full_name.as_deref(), Some("Asha Rao"));
        assert_eq!(details.gender.as_deref(), Some("Female"));
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let base = serve_fake_gemini().await;
        let client = GeminiClient::new("wrong-key".to_string()).with_base_url(&base);

        let err = client.extract(&images()).await.unwrap_err();
        assert!(matches!(&err, ExtractError::Api(m) if m == "API key not valid"));
    }

    #[tokio::test]
    async fn test_connection_error_hides_key() {
        // Nothing listens on port 1
        let client = GeminiClient::new(KEY.to_string()).with_base_url("http://127.0.0.1:1/models");

        let err = client.extract(&images()).await.unwrap_err();
        assert!(matches!(err, ExtractError::Http(_)));
        let message = err.to_string();
        assert!(!message.contains(KEY), "key leaked: {}", message);
        assert!(!message.contains("127.0.0.1:1"), "url leaked: {}", message);
    }
}
