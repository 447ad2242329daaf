//! Inference collaborator seam.
//!
//! The extractor and analyst only need three capabilities from the remote
//! model: upload a document, generate text (optionally about an uploaded
//! document), and delete an upload. `GeminiInference` provides them over the
//! Gemini REST API; `testing::MockInference` provides them in tests.

use std::path::Path;

use async_trait::async_trait;
use gemini_client::{Content, GeminiClient, GenerateContentRequest, Part};

/// Handle to a document stored by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDocument {
    /// Collaborator-side identifier, used for deletion
    pub name: String,

    /// Reference passed back in prompts
    pub uri: String,

    pub mime_type: String,
}

/// Boxed error returned by collaborator calls.
pub type InferenceError = Box<dyn std::error::Error + Send + Sync>;

/// Remote multimodal model used for extraction and analysis.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Upload a local document.
    async fn upload(&self, path: &Path, mime_type: &str) -> Result<RemoteDocument, InferenceError>;

    /// Generate free-form text for an instruction, optionally about a document.
    async fn generate(
        &self,
        instruction: &str,
        document: Option<&RemoteDocument>,
    ) -> Result<String, InferenceError>;

    /// Delete a previously uploaded document.
    async fn delete(&self, document: &RemoteDocument) -> Result<(), InferenceError>;
}

/// Gemini-backed collaborator.
#[derive(Clone)]
pub struct GeminiInference {
    client: GeminiClient,
    model: String,
}

impl GeminiInference {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl InferenceClient for GeminiInference {
    async fn upload(&self, path: &Path, mime_type: &str) -> Result<RemoteDocument, InferenceError> {
        let file = self.client.upload_file(path, mime_type).await?;
        Ok(RemoteDocument {
            name: file.name,
            uri: file.uri,
            mime_type: file.mime_type,
        })
    }

    async fn generate(
        &self,
        instruction: &str,
        document: Option<&RemoteDocument>,
    ) -> Result<String, InferenceError> {
        let mut parts = vec![Part::text(instruction)];
        if let Some(document) = document {
            parts.push(Part::file_uri(&document.uri, &document.mime_type));
        }

        let request = GenerateContentRequest::new()
            .content(Content::user(parts))
            .temperature(0.0)
            .json_response();

        Ok(self.client.generate_text(&self.model, request).await?)
    }

    async fn delete(&self, document: &RemoteDocument) -> Result<(), InferenceError> {
        self.client.delete_file(&document.name).await?;
        Ok(())
    }
}
