//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the service with mock implementations.

use crate::classifier::{DiseaseInfo, DiseaseMetadata};
use crate::db::Database;
use crate::sequencer::Catalog;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Catalog unavailable: {0}")]
pub struct CatalogError(pub String);

/// Source of the question catalog, read once per request
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_catalog(&self) -> Result<Catalog, CatalogError>;
}

/// Label → disease lookup
pub trait MetadataTable: Send + Sync {
    fn lookup(&self, label: &str) -> Option<DiseaseInfo>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    async fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        (**self).load_catalog().await
    }
}

impl<T: MetadataTable + ?Sized> MetadataTable for Arc<T> {
    fn lookup(&self, label: &str) -> Option<DiseaseInfo> {
        (**self).lookup(label)
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter to use Database as a `CatalogSource`
#[derive(Clone)]
pub struct DatabaseCatalog {
    db: Database,
}

impl DatabaseCatalog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogSource for DatabaseCatalog {
    async fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        let questions = self
            .db
            .list_questions()
            .map_err(|e| CatalogError(e.to_string()))?;
        let rules = self
            .db
            .list_skip_rules()
            .map_err(|e| CatalogError(e.to_string()))?;
        Ok(Catalog::new(questions, rules))
    }
}

impl MetadataTable for DiseaseMetadata {
    fn lookup(&self, label: &str) -> Option<DiseaseInfo> {
        DiseaseMetadata::lookup(self, label)
    }
}
