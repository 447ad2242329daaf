//! Per-document spec extraction.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::ExtractionFailure;
use crate::inference::{InferenceClient, RemoteDocument};
use crate::normalize::decode;
use crate::prompts::EXTRACT_SPEC_PROMPT;
use crate::record::SpecRecord;

/// MIME type every input document is uploaded as.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Extracts a `SpecRecord` from one spec sheet.
pub struct SpecExtractor<'a, C: InferenceClient> {
    client: &'a C,
}

impl<'a, C: InferenceClient> SpecExtractor<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Upload the document, ask the model for the record, and decode it.
    ///
    /// The upload is removed afterwards whether or not extraction succeeded.
    pub async fn extract(&self, path: &Path) -> Result<SpecRecord, ExtractionFailure> {
        info!(path = %path.display(), "Analyzing spec sheet");

        let document = self
            .client
            .upload(path, PDF_MIME_TYPE)
            .await
            .map_err(ExtractionFailure::Upload)?;
        debug!(path = %path.display(), document = %document.name, "Spec sheet uploaded");

        let response = self
            .client
            .generate(EXTRACT_SPEC_PROMPT, Some(&document))
            .await;

        self.cleanup(&document).await;

        let response = response.map_err(ExtractionFailure::Inference)?;
        let record: SpecRecord = decode(&response)?;

        info!(
            path = %path.display(),
            product = %record.product_name,
            price = ?record.price_value(),
            "Extracted spec record"
        );
        Ok(record)
    }

    /// Best-effort removal of an upload. Failures are logged and dropped.
    async fn cleanup(&self, document: &RemoteDocument) {
        if let Err(e) = self.client.delete(document).await {
            warn!(document = %document.name, error = %e, "Failed to delete uploaded spec sheet");
        }
    }
}
