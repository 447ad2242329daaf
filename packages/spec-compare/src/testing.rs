//! Testing utilities including a scripted inference collaborator.
//!
//! Useful for exercising the extractor, analyst and pipeline without making
//! real Gemini calls.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::inference::{InferenceClient, InferenceError, RemoteDocument};

/// Scripted response for one call.
#[derive(Debug, Clone)]
enum Scripted {
    Text(String),
    Error(String),
}

/// A mock inference collaborator for testing.
///
/// Document responses are keyed by the uploaded file's name (e.g.
/// "laptop_a.pdf"); text-only calls get the analysis response.
#[derive(Default, Clone)]
pub struct MockInference {
    /// Responses for calls that reference a document, by file name
    documents: Arc<RwLock<HashMap<String, Scripted>>>,

    /// Response for text-only calls
    analysis: Arc<RwLock<Option<Scripted>>>,

    /// File names whose upload fails
    upload_failures: Arc<RwLock<HashSet<String>>>,

    /// Whether deletes fail
    fail_deletes: Arc<RwLock<bool>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockCall>>>,
}

/// Record of a call made to the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Upload { file_name: String },
    Generate { document: Option<String>, instruction: String },
    Delete { name: String },
}

impl MockInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer prompts about `file_name` with `text`.
    pub fn with_document_response(self, file_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents
            .write()
            .unwrap()
            .insert(file_name.into(), Scripted::Text(text.into()));
        self
    }

    /// Fail prompts about `file_name`.
    pub fn with_document_error(self, file_name: impl Into<String>, message: impl Into<String>) -> Self {
        self.documents
            .write()
            .unwrap()
            .insert(file_name.into(), Scripted::Error(message.into()));
        self
    }

    /// Fail the upload of `file_name`.
    pub fn with_upload_failure(self, file_name: impl Into<String>) -> Self {
        self.upload_failures.write().unwrap().insert(file_name.into());
        self
    }

    /// Answer text-only prompts with `text`.
    pub fn with_analysis_response(self, text: impl Into<String>) -> Self {
        *self.analysis.write().unwrap() = Some(Scripted::Text(text.into()));
        self
    }

    /// Fail text-only prompts.
    pub fn with_analysis_error(self, message: impl Into<String>) -> Self {
        *self.analysis.write().unwrap() = Some(Scripted::Error(message.into()));
        self
    }

    /// Make every delete fail.
    pub fn with_failing_deletes(self) -> Self {
        *self.fail_deletes.write().unwrap() = true;
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of uploads made.
    pub fn upload_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::Upload { .. }))
    }

    /// Number of deletes attempted.
    pub fn delete_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::Delete { .. }))
    }

    /// Number of text-only generate calls.
    pub fn analysis_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::Generate { document: None, .. }))
    }

    fn count(&self, pred: impl Fn(&MockCall) -> bool) -> usize {
        self.calls.read().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: MockCall) {
        self.calls.write().unwrap().push(call);
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[async_trait]
impl InferenceClient for MockInference {
    async fn upload(&self, path: &Path, mime_type: &str) -> Result<RemoteDocument, InferenceError> {
        let file_name = file_name_of(path);
        self.record(MockCall::Upload {
            file_name: file_name.clone(),
        });

        if self.upload_failures.read().unwrap().contains(&file_name) {
            return Err(format!("upload rejected: {}", file_name).into());
        }

        Ok(RemoteDocument {
            name: format!("files/{}", file_name),
            uri: format!("mock://files/{}", file_name),
            mime_type: mime_type.to_string(),
        })
    }

    async fn generate(
        &self,
        instruction: &str,
        document: Option<&RemoteDocument>,
    ) -> Result<String, InferenceError> {
        let key = document.map(|d| d.name.trim_start_matches("files/").to_string());
        self.record(MockCall::Generate {
            document: key.clone(),
            instruction: instruction.to_string(),
        });

        let scripted = match &key {
            Some(file_name) => self.documents.read().unwrap().get(file_name).cloned(),
            None => self.analysis.read().unwrap().clone(),
        };

        match scripted {
            Some(Scripted::Text(text)) => Ok(text),
            Some(Scripted::Error(message)) => Err(message.into()),
            None => Err(format!("no scripted response for {:?}", key).into()),
        }
    }

    async fn delete(&self, document: &RemoteDocument) -> Result<(), InferenceError> {
        self.record(MockCall::Delete {
            name: document.name.clone(),
        });

        if *self.fail_deletes.read().unwrap() {
            return Err("delete rejected".into());
        }
        Ok(())
    }
}
