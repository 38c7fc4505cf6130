//! Disease classifier abstraction
//!
//! Maps an answer transcript to a disease label, and a label to
//! human-readable disease metadata.

mod error;
mod http;
mod metadata;

pub use error::{ClassifierError, ClassifierErrorKind};
pub use http::{ClassifierConfig, HttpClassifier};
pub use metadata::{DiseaseInfo, DiseaseMetadata, MetadataError};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for transcript classifiers
#[async_trait]
pub trait DiseaseClassifier: Send + Sync {
    /// Classify a transcript into a label
    async fn classify(&self, transcript: &str) -> Result<String, ClassifierError>;

    /// Identifier of the underlying model
    fn model_id(&self) -> &str;
}

/// Logging wrapper for classifiers
pub struct LoggingClassifier {
    inner: Arc<dyn DiseaseClassifier>,
    model_id: String,
}

impl LoggingClassifier {
    pub fn new(inner: Arc<dyn DiseaseClassifier>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl DiseaseClassifier for LoggingClassifier {
    async fn classify(&self, transcript: &str) -> Result<String, ClassifierError> {
        let start = std::time::Instant::now();
        let result = self.inner.classify(transcript).await;
        let duration = start.elapsed();

        match &result {
            Ok(label) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    transcript_chars = transcript.chars().count(),
                    label = %label,
                    "Classification completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    retry_after_secs = ?e.retry_after.map(|d| d.as_secs()),
                    "Classification failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[async_trait]
impl<T: DiseaseClassifier + ?Sized> DiseaseClassifier for Arc<T> {
    async fn classify(&self, transcript: &str) -> Result<String, ClassifierError> {
        (**self).classify(transcript).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}
