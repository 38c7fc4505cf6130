//! Olive disease diagnosis service
//!
//! An adaptive questionnaire: each answer prunes irrelevant follow-up
//! questions, and the full transcript is classified into a diagnosis.

mod api;
mod classifier;
mod db;
mod runtime;
mod sequencer;

use api::{create_router, AppState};
use classifier::{ClassifierConfig, DiseaseClassifier, DiseaseMetadata, HttpClassifier, LoggingClassifier};
use db::Database;
use runtime::{
    spawn_sweeper, CatalogSource, DatabaseCatalog, DiagnosisService, InMemorySessionStore,
    MetadataTable, SessionConfig, SessionStore,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "olive_diagnosis=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let db_path = std::env::var("OLIVE_DB_PATH").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        format!("{home}/.olive-diagnosis/catalog.db")
    });

    let port: u16 = std::env::var("OLIVE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let metadata_path = std::env::var("OLIVE_METADATA_PATH")
        .unwrap_or_else(|_| "disease_metadata.json".to_string());

    // Ensure database directory exists
    if let Some(parent) = PathBuf::from(&db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize database
    tracing::info!(path = %db_path, "Opening database");
    let db = Database::open(&db_path)?;

    if let Ok(seed_path) = std::env::var("OLIVE_CATALOG_SEED") {
        match db.seed_from_file_if_empty(&seed_path) {
            Ok(true) => tracing::info!(path = %seed_path, "Seeded empty catalog"),
            Ok(false) => tracing::info!("Catalog already populated, skipping seed"),
            Err(e) => tracing::warn!(path = %seed_path, error = %e, "Catalog seed failed"),
        }
    }

    // Disease metadata: missing or invalid tables degrade to placeholders
    let metadata = match DiseaseMetadata::load(&metadata_path) {
        Ok(metadata) if metadata.is_empty() => {
            tracing::warn!(path = %metadata_path, "Disease metadata table is empty");
            metadata
        }
        Ok(metadata) => {
            tracing::info!(path = %metadata_path, labels = metadata.len(), "Loaded disease metadata");
            metadata
        }
        Err(e) => {
            tracing::warn!(path = %metadata_path, error = %e, "Disease metadata unavailable");
            DiseaseMetadata::default()
        }
    };

    // Classifier
    let classifier_config = ClassifierConfig::from_env();
    if classifier_config.api_key.is_none() {
        tracing::warn!("No classifier API key configured. Set CLASSIFIER_API_KEY.");
    }
    let http_classifier: Arc<dyn DiseaseClassifier> = Arc::new(HttpClassifier::new(classifier_config)?);
    let classifier: Arc<dyn DiseaseClassifier> = Arc::new(LoggingClassifier::new(http_classifier));
    tracing::info!(model = %classifier.model_id(), "Classifier initialized");

    // Sessions
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let session_config = SessionConfig::from_env();
    if spawn_sweeper(Arc::clone(&store), &session_config).is_none() {
        tracing::info!("Session expiry disabled");
    }

    // Create application state
    let catalog: Arc<dyn CatalogSource> = Arc::new(DatabaseCatalog::new(db));
    let metadata: Arc<dyn MetadataTable> = Arc::new(metadata);
    let service = DiagnosisService::new(catalog, classifier, metadata, store);
    let state = AppState::new(service);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Olive diagnosis server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
