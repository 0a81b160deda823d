//! HTTP Server for the check-in API.
//!
//! # API Endpoints
//!
//! | Method | Path           | Description                                  |
//! |--------|----------------|----------------------------------------------|
//! | GET    | `/hello`       | Liveness message                             |
//! | GET    | `/health`      | Health check                                 |
//! | POST   | `/file/upload` | Upload front/back images, get a check-in ID  |
//! | GET    | anything else  | Static files, when a directory is configured |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::types::{error_response, UploadReply, MIN_FILES_MESSAGE};
use crate::error::ServerResult;
use crate::extract::{Extractor, UploadedImage};
use crate::logs::{log_error, log_info, log_info_indent, log_success, log_warning};
use crate::store::RecordStore;

/// Multipart field carrying the images.
pub const UPLOAD_FIELD: &str = "files";

/// Largest accepted request body.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn Extractor>,
    pub store: Arc<Mutex<RecordStore>>,
}

impl AppState {
    pub fn new(extractor: Arc<dyn Extractor>, store: RecordStore) -> Self {
        Self {
            extractor,
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// Build the application router
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    // Permissive CORS: the widget is served from another origin
    let cors = CorsLayer::permissive();

    let mut app = Router::new()
        .route("/hello", get(hello))
        .route("/health", get(health))
        .route("/file/upload", post(upload_files));

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(port: u16, state: AppState, static_dir: Option<PathBuf>) -> ServerResult<()> {
    if let Some(dir) = &static_dir {
        log_info(format!("📁 Serving static files from {}", dir.display()));
    }
    let app = router(state, static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Check-in server running on http://localhost:{}", port);
    println!("   POST /file/upload - Upload front/back images");
    println!("   GET  /hello       - Liveness message");
    println!("   GET  /health      - Health check");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn hello() -> Json<Value> {
    Json(json!({ "message": "Server is running the latest code!" }))
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "checkin",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /file/upload",
            "hello": "GET /hello"
        }
    }))
}

/// Upload endpoint
async fn upload_files(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadReply>, (StatusCode, Json<Value>)> {
    let mut multipart = multipart.map_err(|e| {
        log_warning(format!("Rejected upload: {}", e.body_text()));
        (
            StatusCode::BAD_REQUEST,
            Json(error_response(&format!("Multipart error: {}", e.body_text()))),
        )
    })?;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (StatusCode::BAD_REQUEST, Json(error_response(&format!("Multipart error: {}", e))))
    })? {
        let name = field.name().unwrap_or("").to_string();
        if name != UPLOAD_FIELD {
            log_warning(format!("Ignoring multipart field '{}'", name));
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("upload-{}", files.len() + 1));
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            (StatusCode::BAD_REQUEST, Json(error_response(&format!("Read error: {}", e))))
        })?;

        files.push(UploadedImage::new(filename, content_type, bytes.to_vec()));
    }

    println!("\n{}", "=".repeat(70));
    println!("📄 NEW UPLOAD: {} file(s)", files.len());
    for file in &files {
        log_info_indent(format!("{} ({} bytes)", file.filename, file.bytes.len()), 1);
    }
    println!("{}\n", "=".repeat(70));

    Ok(Json(process_upload(&state, files).await))
}

/// Extract, store and build the reply for one upload.
///
/// Only the first two images are used: front, then back.
pub async fn process_upload(state: &AppState, files: Vec<UploadedImage>) -> UploadReply {
    if files.len() < 2 {
        log_warning(format!("Rejected upload with {} file(s)", files.len()));
        return UploadReply::error(MIN_FILES_MESSAGE);
    }

    let images: Vec<UploadedImage> = files.into_iter().take(2).collect();
    let filenames: Vec<String> = images.iter().map(|i| i.filename.clone()).collect();

    let details = match state.extractor.extract(&images).await {
        Ok(details) => details,
        Err(e) => {
            log_error(format!("Extraction failed: {}", e));
            return UploadReply::error(format!("Gemini/Processing error: {}", e));
        }
    };

    let saved = state.store.lock().await.insert(&details, filenames).await;
    match saved {
        Ok(record) => {
            log_success(format!("Saved record #{}", record.id));
            UploadReply::saved(&record, details)
        }
        Err(e) => {
            log_error(format!("Failed to save record: {}", e));
            UploadReply::error(format!("Database error: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractError, ExtractResult};
    use crate::extract::UnconfiguredExtractor;
    use crate::models::IdentityDetails;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    /// Returns fixed details and records what it was given.
    #[derive(Default)]
    struct StubExtractor {
        seen: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl Extractor for StubExtractor {
        async fn extract(&self, images: &[UploadedImage]) -> ExtractResult<IdentityDetails> {
            let mut seen = self.seen.lock().unwrap();
            seen.extend(images.iter().map(|i| i.filename.clone()));
            Ok(IdentityDetails {
                full_name: Some("Asha Rao".into()),
                date_of_birth: Some("15/08/1990".into()),
                ..Default::default()
            })
        }
    }

    struct FailingExtractor;

    #[async_trait]
    impl Extractor for FailingExtractor {
        async fn extract(&self, _images: &[UploadedImage]) -> ExtractResult<IdentityDetails> {
            Err(ExtractError::InvalidResponse("Empty response".into()))
        }
    }

    fn image(name: &str) -> UploadedImage {
        UploadedImage::new(name, Some("image/jpeg".into()), vec![0xFF, 0xD8])
    }

    #[tokio::test]
    async fn test_single_file_is_rejected() {
        let state = AppState::new(Arc::new(StubExtractor::default()), RecordStore::in_memory());
        let reply = process_upload(&state, vec![image("front.jpg")]).await;
        assert!(reply.is_error());
        assert_eq!(reply.message, MIN_FILES_MESSAGE);
        assert!(state.store.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_two_files_saved_in_order() {
        let extractor = Arc::new(StubExtractor::default());
        let state = AppState::new(extractor.clone(), RecordStore::in_memory());

        let reply = process_upload(&state, vec![image("front.jpg"), image("back.jpg")]).await;
        assert_eq!(reply.status, "success");
        assert_eq!(reply.record_id, Some(1));
        assert_eq!(
            reply.filenames,
            Some(vec!["front.jpg".to_string(), "back.jpg".to_string()])
        );

        let store = state.store.lock().await;
        let record = store.get(1).unwrap();
        assert_eq!(record.date_of_birth, chrono::NaiveDate::from_ymd_opt(1990, 8, 15));
        assert_eq!(*extractor.seen.lock().unwrap(), vec!["front.jpg", "back.jpg"]);
    }

    #[tokio::test]
    async fn test_extra_files_are_ignored() {
        let extractor = Arc::new(StubExtractor::default());
        let state = AppState::new(extractor.clone(), RecordStore::in_memory());

        let files = vec![image("front.jpg"), image("back.jpg"), image("selfie.jpg")];
        let reply = process_upload(&state, files).await;
        assert_eq!(reply.filenames.map(|f| f.len()), Some(2));
        assert_eq!(extractor.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_extraction_failure_reply() {
        let state = AppState::new(Arc::new(FailingExtractor), RecordStore::in_memory());
        let reply = process_upload(&state, vec![image("f.jpg"), image("b.jpg")]).await;
        assert!(reply.is_error());
        assert!(reply.message.starts_with("Gemini/Processing error:"));
        assert!(reply.message.contains("Empty response"));
    }

    #[tokio::test]
    async fn test_missing_key_reply() {
        let state = AppState::new(Arc::new(UnconfiguredExtractor), RecordStore::in_memory());
        let reply = process_upload(&state, vec![image("f.jpg"), image("b.jpg")]).await;
        assert!(reply.message.contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn test_store_failure_reply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let store = RecordStore::open(&path).unwrap();
        // Occupy the file path with a directory so the write fails
        std::fs::create_dir(&path).unwrap();

        let state = AppState::new(Arc::new(StubExtractor::default()), store);
        let reply = process_upload(&state, vec![image("f.jpg"), image("b.jpg")]).await;
        assert!(reply.is_error());
        assert!(reply.message.starts_with("Database error:"));
    }

    // -------------------------------------------------------------------------
    // Through the router
    // -------------------------------------------------------------------------

    async fn serve(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state, None)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn jpeg(name: &str) -> reqwest::multipart::Part {
        reqwest::multipart::Part::bytes(vec![0xFF, 0xD8])
            .file_name(name.to_string())
            .mime_str("image/jpeg")
            .unwrap()
    }

    #[tokio::test]
    async fn test_hello_route() {
        let base = serve(AppState::new(Arc::new(StubExtractor::default()), RecordStore::in_memory())).await;
        let body: Value = reqwest::get(format!("{}/hello", base)).await.unwrap().json().await.unwrap();
        assert_eq!(body["message"], "Server is running the latest code!");
    }

    #[tokio::test]
    async fn test_upload_route_filters_fields() {
        let extractor = Arc::new(StubExtractor::default());
        let state = AppState::new(extractor.clone(), RecordStore::in_memory());
        let base = serve(state.clone()).await;

        // A stray text field, then a part with no filename
        let form = reqwest::multipart::Form::new()
            .part(UPLOAD_FIELD, jpeg("front.jpg"))
            .text("note", "ignored")
            .part(UPLOAD_FIELD, reqwest::multipart::Part::bytes(vec![0xFF, 0xD8]));

        let response = reqwest::Client::new()
            .post(format!("{}/file/upload", base))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let reply: UploadReply = response.json().await.unwrap();
        assert_eq!(reply.status, "success");
        assert_eq!(reply.record_id, Some(1));
        assert_eq!(
            reply.filenames,
            Some(vec!["front.jpg".to_string(), "upload-2".to_string()])
        );
        assert_eq!(*extractor.seen.lock().unwrap(), vec!["front.jpg", "upload-2"]);
        assert_eq!(state.store.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_route_single_file() {
        let base = serve(AppState::new(Arc::new(StubExtractor::default()), RecordStore::in_memory())).await;
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, jpeg("front.jpg"));

        let response = reqwest::Client::new()
            .post(format!("{}/file/upload", base))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let reply: UploadReply = response.json().await.unwrap();
        assert!(reply.is_error());
        assert_eq!(reply.message, MIN_FILES_MESSAGE);
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_json_400() {
        let base = serve(AppState::new(Arc::new(StubExtractor::default()), RecordStore::in_memory())).await;

        let response = reqwest::Client::new()
            .post(format!("{}/file/upload", base))
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body("front.jpg")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().starts_with("Multipart error:"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_header() {
        let base = serve(AppState::new(Arc::new(StubExtractor::default()), RecordStore::in_memory())).await;

        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{}/file/upload", base))
            .header("Origin", "https://widget.example.org")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "x-requested-with")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-headers"], "*");
    }
}
