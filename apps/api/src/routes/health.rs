use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::analysis::vocabulary::VOCABULARY_VERSION;
use crate::state::AppState;

/// GET /health
/// Returns service status, version, storage backends and vocabulary version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resumatch-api",
        "storage": state.repo.backend(),
        "objectStorage": state.objects.is_some(),
        "vocabularyVersion": VOCABULARY_VERSION,
    }))
}
