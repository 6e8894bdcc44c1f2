use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, dataset size, and whether AI enrichment is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let ai_enabled = state.llm.is_enabled();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-coach-api",
        "jobs_loaded": state.dataset.len(),
        "ai_enabled": ai_enabled,
        "ai_model": ai_enabled.then(|| state.config.gemini_model.clone()),
    }))
}
