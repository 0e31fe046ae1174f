use std::sync::Arc;

use crate::config::Config;
use crate::ranking::pipeline::RankingPipeline;
use crate::ranking::storage::UploadStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extraction strategies, skill dictionary, and scorer, built once at startup.
    pub pipeline: Arc<RankingPipeline>,
    pub uploads: UploadStore,
}
