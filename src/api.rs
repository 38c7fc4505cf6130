//! HTTP API for the diagnosis questionnaire

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::SharedService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SharedService>,
}

impl AppState {
    pub fn new(service: SharedService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
