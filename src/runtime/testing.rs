//! Mock implementations for testing
//!
//! These mocks enable service and handler tests without real I/O.

use super::traits::{CatalogError, CatalogSource};
use crate::classifier::{ClassifierError, DiseaseClassifier, DiseaseInfo, DiseaseMetadata};
use crate::db::{Question, SkipRule};
use crate::sequencer::Catalog;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock Catalog
// ============================================================================

/// Catalog that can be swapped or made unavailable mid-test
pub struct MockCatalog {
    catalog: Mutex<Option<Catalog>>,
}

#[allow(dead_code)]
impl MockCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(Some(catalog)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            catalog: Mutex::new(None),
        }
    }

    pub fn set(&self, catalog: Catalog) {
        *self.catalog.lock().unwrap() = Some(catalog);
    }

    pub fn make_unavailable(&self) {
        *self.catalog.lock().unwrap() = None;
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        self.catalog
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CatalogError("mock catalog unavailable".to_string()))
    }
}

// ============================================================================
// Mock Classifier
// ============================================================================

/// Classifier returning queued results, recording every transcript
pub struct MockClassifier {
    responses: Mutex<VecDeque<Result<String, ClassifierError>>>,
    delay: Option<Duration>,
    /// Record of all transcripts classified
    pub transcripts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockClassifier {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            delay: None,
            transcripts: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to widen race windows
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_label(&self, label: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(label.into()));
    }

    pub fn queue_error(&self, error: ClassifierError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_transcripts(&self) -> Vec<String> {
        self.transcripts.lock().unwrap().clone()
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiseaseClassifier for MockClassifier {
    async fn classify(&self, transcript: &str) -> Result<String, ClassifierError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.transcripts.lock().unwrap().push(transcript.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClassifierError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        "mock-classifier"
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// leaf color? → spots present? → wilting?
pub fn three_question_catalog(rules: Vec<SkipRule>) -> Catalog {
    Catalog::new(
        vec![
            Question::new(1, "leaf color?", Some("yellow/green/brown")),
            Question::new(2, "spots present?", Some("yes/no")),
            Question::new(3, "wilting?", Some("yes/no")),
        ],
        rules,
    )
}

pub fn sample_metadata() -> DiseaseMetadata {
    DiseaseMetadata::from_entries([
        (
            "0".to_string(),
            DiseaseInfo::new("Peacock spot", "Copper-based fungicide"),
        ),
        (
            "1".to_string(),
            DiseaseInfo::new("Verticillium wilt", "Remove infected wood"),
        ),
    ])
}
