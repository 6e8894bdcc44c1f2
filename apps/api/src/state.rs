use std::sync::Arc;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::llm_client::TextGenerator;
use crate::recommend::pipeline::RecommendSettings;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only after startup; requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    /// `GeminiClient` when an API key is configured, `DisabledGenerator` otherwise.
    pub llm: Arc<dyn TextGenerator>,
    pub settings: RecommendSettings,
    pub config: Config,
}
