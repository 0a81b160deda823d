//! HTTP transport for the document upload.

use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::types::{AppError, AppResult, SelectedFile, TransportResponse};
use crate::widget::UploadTransport;

/// Posts the selected files with `fetch`, through `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl UploadTransport for FetchTransport {
    type Blob = File;

    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        files: &[SelectedFile<File>],
    ) -> AppResult<TransportResponse> {
        // Boundary is assigned by the browser
        let form_data = FormData::new()
            .map_err(|e| AppError::Network(format!("Failed to create FormData: {:?}", e)))?;

        for file in files {
            form_data
                .append_with_blob_and_filename(field, &file.blob, &file.name)
                .map_err(|e| AppError::Network(format!("Failed to append file: {:?}", e)))?;
        }

        let request = Request::post(url)
            .body(form_data)
            .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read response: {}", e)))?;

        Ok(TransportResponse {
            status,
            status_text,
            body,
        })
    }
}
