//! Runtime for questionnaire sessions
//!
//! Wires the pure sequencer to its collaborators: catalog storage,
//! classifier, metadata table and the in-memory session store.

mod service;
mod store;
pub mod traits;

#[cfg(test)]
pub mod testing;

#[allow(unused_imports)] // Public API re-exports
pub use service::{DiagnosisService, Reply, ServiceError};
#[allow(unused_imports)]
pub use store::{spawn_sweeper, InMemorySessionStore, SessionConfig, SessionHandle, SessionStore};
pub use traits::*;

use crate::classifier::DiseaseClassifier;
use std::sync::Arc;

/// Type-erased service shared across HTTP handlers
pub type SharedService =
    DiagnosisService<Arc<dyn CatalogSource>, Arc<dyn DiseaseClassifier>, Arc<dyn MetadataTable>>;
