use std::sync::Arc;

use crate::backend_client::AnalysisBackend;
use crate::config::Config;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Analysis backend. Default: `HttpBackend`; tests swap in an in-memory double.
    pub backend: Arc<dyn AnalysisBackend>,
    /// Criteria editing sessions, one weight allocator each.
    pub sessions: SessionStore,
    pub config: Config,
}
