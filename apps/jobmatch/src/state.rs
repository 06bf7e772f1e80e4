use std::sync::Arc;

use crate::config::Config;
use crate::matching::engine::MatchEngine;
use crate::matching::ranker::Ranker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Match engine over the configured data source, with the configured default weights.
    pub engine: Arc<MatchEngine>,
    /// Ranker sharing `engine`; concurrency bounded by `config.matching.concurrency`.
    pub ranker: Arc<Ranker>,
}

impl AppState {
    pub fn new(config: Config, engine: Arc<MatchEngine>) -> Self {
        let ranker = Arc::new(Ranker::new(engine.clone(), config.matching.concurrency));
        Self {
            config,
            engine,
            ranker,
        }
    }
}
