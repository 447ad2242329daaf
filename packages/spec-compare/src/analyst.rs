//! Cross-product qualitative comparison.

use tracing::{debug, info};

use crate::error::{AnalysisFailure, ParseFailure};
use crate::inference::InferenceClient;
use crate::normalize::decode;
use crate::prompts::format_compare_prompt;
use crate::record::{ComparisonVerdict, SpecRecord};

/// Asks the model to rank the extracted products.
pub struct Analyst<'a, C: InferenceClient> {
    client: &'a C,
}

impl<'a, C: InferenceClient> Analyst<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn analyze(&self, records: &[SpecRecord]) -> Result<ComparisonVerdict, AnalysisFailure> {
        if records.is_empty() {
            return Err(AnalysisFailure::NoRecords);
        }

        info!(products = records.len(), "Requesting AI comparison");

        let products_json = serde_json::to_string_pretty(records).map_err(ParseFailure::Json)?;
        let prompt = format_compare_prompt(&products_json);
        debug!(prompt_len = prompt.len(), "Comparison prompt built");

        let response = self
            .client
            .generate(&prompt, None)
            .await
            .map_err(AnalysisFailure::Inference)?;
        let verdict: ComparisonVerdict = decode(&response)?;

        info!(best_value = %verdict.best_value_product, "AI comparison completed");
        Ok(verdict)
    }
}
