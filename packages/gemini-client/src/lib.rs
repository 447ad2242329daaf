//! Pure Gemini REST API client
//!
//! A small client for the Gemini API with no domain-specific logic.
//! Supports file uploads, file deletion and `generateContent`.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{Content, GeminiClient, GenerateContentRequest, Part};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let file = client.upload_file("sheet.pdf", "application/pdf").await?;
//! let text = client
//!     .generate_text(
//!         "gemini-2.0-flash",
//!         GenerateContentRequest::new()
//!             .content(Content::user(vec![Part::text("Summarize"), Part::file(&file)])),
//!     )
//!     .await?;
//! client.delete_file(&file.name).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use std::path::Path;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, test servers, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a local file through the Files API.
    ///
    /// Uses the resumable protocol: a start request announces size and type
    /// and returns a session URL, then a single request uploads and finalizes.
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        mime_type: &str,
    ) -> Result<UploadedFile> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        let start = self
            .http_client
            .post(format!("{}/upload/v1beta/files", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", bytes.len())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&UploadStart {
                file: UploadStartFile {
                    display_name: &display_name,
                },
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini upload start failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = start.status();
        if !status.is_success() {
            let error_text = start.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini upload start rejected");
            return Err(GeminiError::Api(format!("Gemini upload error: {}", error_text)));
        }

        let upload_url = start
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| GeminiError::Parse("Upload session URL missing".into()))?;

        let size = bytes.len();
        let response = self
            .http_client
            .post(upload_url)
            .header("X-Goog-Upload-Offset", 0)
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini upload failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini upload rejected");
            return Err(GeminiError::Api(format!("Gemini upload error: {}", error_text)));
        }

        let uploaded: types::UploadResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            file = %uploaded.file.name,
            bytes = size,
            display_name = %display_name,
            "Gemini file uploaded"
        );

        Ok(uploaded.file)
    }

    /// Delete a previously uploaded file by resource name ("files/...").
    pub async fn delete_file(&self, name: &str) -> Result<()> {
        let response = self
            .http_client
            .delete(format!("{}/v1beta/{}", self.base_url, name))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api(format!("Gemini delete error: {}", error_text)));
        }

        debug!(file = %name, "Gemini file deleted");
        Ok(())
    }

    /// Generate content.
    ///
    /// Send a request to `models/{model}:generateContent` and get the raw
    /// response back.
    pub async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(format!("Gemini API error: {}", error_text)));
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            total_tokens = generated.usage_metadata.as_ref().map(|u| u.total_token_count),
            "Gemini generate content"
        );

        Ok(generated)
    }

    /// Generate content and return the text of the first candidate.
    pub async fn generate_text(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<String> {
        let response = self.generate_content(model, request).await?;

        response.text().ok_or_else(|| {
            GeminiError::Api(format!(
                "No text in Gemini response (finish reason: {})",
                response.finish_reason().unwrap_or("none")
            ))
        })
    }
}
