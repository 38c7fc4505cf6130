//! Diagnosis service
//!
//! Orchestrates a questionnaire session: catalog read, pure sequencer
//! step, and on exhaustion classification plus metadata lookup.

use super::store::SessionStore;
use super::traits::{CatalogError, CatalogSource, MetadataTable};
use crate::classifier::{ClassifierError, DiseaseClassifier};
use crate::sequencer::prompts::{
    fallback_suggestions, DEGRADED_GREETING, FALLBACK_GREETING, RESTART_PROMPT,
};
use crate::sequencer::{advance, Diagnosis, Session, Step};
use std::sync::Arc;
use thiserror::Error;

/// What the user sees after `start` or `answer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub session_id: String,
    pub question: String,
    pub suggestions: Vec<String>,
    pub is_final: bool,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error(transparent)]
    CatalogUnavailable(#[from] CatalogError),
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(#[from] ClassifierError),
}

impl ServiceError {
    /// Errors the caller should surface as-is rather than restart from
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::SessionNotFound(_))
    }
}

/// Generic service that can work with any catalog, classifier and metadata
pub struct DiagnosisService<C, L, M>
where
    C: CatalogSource,
    L: DiseaseClassifier,
    M: MetadataTable,
{
    catalog: C,
    classifier: L,
    metadata: M,
    store: Arc<dyn SessionStore>,
}

impl<C, L, M> DiagnosisService<C, L, M>
where
    C: CatalogSource,
    L: DiseaseClassifier,
    M: MetadataTable,
{
    pub fn new(catalog: C, classifier: L, metadata: M, store: Arc<dyn SessionStore>) -> Self {
        Self {
            catalog,
            classifier,
            metadata,
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Open a session on the first catalog question.
    ///
    /// Never fails: an empty catalog yields the fallback greeting and an
    /// unreadable one the degraded-mode greeting.
    pub async fn start(&self) -> Reply {
        let (question, suggestions) = match self.catalog.load_catalog().await {
            Ok(catalog) => match catalog.first_question() {
                Some(first) => (first.text.clone(), first.suggestions()),
                None => {
                    tracing::info!("Catalog has no questions, using fallback greeting");
                    (FALLBACK_GREETING.to_string(), fallback_suggestions())
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Starting session in degraded mode");
                (DEGRADED_GREETING.to_string(), fallback_suggestions())
            }
        };
        self.open_session(question, suggestions).await
    }

    /// Open a fresh session after a failed step
    pub async fn restart(&self) -> Reply {
        self.open_session(RESTART_PROMPT.to_string(), fallback_suggestions())
            .await
    }

    async fn open_session(&self, question: String, suggestions: Vec<String>) -> Reply {
        let session_id = uuid::Uuid::new_v4().to_string();
        self.store
            .insert(Session::new(session_id.clone(), question.clone()))
            .await;
        tracing::info!(session_id = %session_id, question = %question, "Session started");
        Reply {
            session_id,
            question,
            suggestions,
            is_final: false,
        }
    }

    /// Apply one answer.
    ///
    /// On any error other than `SessionNotFound` the session is discarded;
    /// the caller is expected to offer [`Self::restart`].
    pub async fn answer(&self, session_id: &str, user_text: &str) -> Result<Reply, ServiceError> {
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| ServiceError::SessionNotFound(session_id.to_string()))?;

        let mut session = handle.lock().await;
        // While we waited, a concurrent step may have finalized it or the
        // sweeper may have evicted it
        let registered = self
            .store
            .get(session_id)
            .await
            .is_some_and(|current| Arc::ptr_eq(&current, &handle));
        if session.is_finalized() || !registered {
            return Err(ServiceError::SessionNotFound(session_id.to_string()));
        }

        let result = self.step(&mut session, user_text).await;

        match &result {
            Ok(reply) if reply.is_final => {
                self.store.remove(session_id).await;
                tracing::info!(
                    session_id = %session_id,
                    answers = session.answers.len(),
                    duration_secs = (chrono::Utc::now() - session.created_at).num_seconds(),
                    "Session finalized"
                );
            }
            Ok(_) => {}
            Err(e) => {
                session.finish();
                self.store.remove(session_id).await;
                tracing::warn!(session_id = %session_id, error = %e, "Session discarded after failed step");
            }
        }

        result
    }

    async fn step(&self, session: &mut Session, user_text: &str) -> Result<Reply, ServiceError> {
        let catalog = self.catalog.load_catalog().await?;
        let answered = session.current_question.clone();

        let adv = advance(session, &catalog, user_text)
            .map_err(|_| ServiceError::SessionNotFound(session.id.clone()))?;

        tracing::debug!(
            session_id = %session.id,
            mentioned = ?adv.mentioned,
            policy = adv.policy.as_str(),
            skipped = adv.skipped.len(),
            next_index = adv.next_index,
            "Answer applied"
        );
        if adv.resumed_from_start() && catalog.questions.iter().any(|q| q.text == answered) {
            tracing::warn!(
                session_id = %session.id,
                question = %answered,
                "Answered question was pruned; resuming at first remaining question"
            );
        }

        match adv.step {
            Step::Next {
                question,
                suggestions,
            } => Ok(Reply {
                session_id: session.id.clone(),
                question,
                suggestions,
                is_final: false,
            }),
            Step::Exhausted { transcript } => {
                let diagnosis = self.finalize(&transcript).await?;
                Ok(Reply {
                    session_id: session.id.clone(),
                    question: diagnosis.message(),
                    suggestions: Vec::new(),
                    is_final: true,
                })
            }
        }
    }

    /// Classify the transcript and resolve the label to a diagnosis
    pub async fn finalize(&self, transcript: &str) -> Result<Diagnosis, ClassifierError> {
        let label = self.classifier.classify(transcript).await?;
        let info = self.metadata.lookup(&label);
        if info.is_none() {
            tracing::warn!(label = %label, "No metadata for label, using placeholders");
        }
        Ok(Diagnosis::from_lookup(info))
    }
}
