use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::Evaluator;
use crate::report::store::ReportStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. `GeminiClient` in production, a scripted double in tests.
    pub evaluator: Arc<dyn Evaluator>,
    /// Finished reports waiting to be downloaded.
    pub reports: ReportStore,
    pub config: Config,
}

impl AppState {
    pub fn new(evaluator: Arc<dyn Evaluator>, config: Config) -> Self {
        Self {
            evaluator,
            reports: ReportStore::new(config.report_cache_capacity),
            config,
        }
    }
}
