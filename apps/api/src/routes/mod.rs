pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::jobs::handlers as jobs;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Headroom on top of the upload limit for multipart framing and form fields.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless analysis
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        // Resume API
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload_resume).get(resumes::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/analyze",
            post(resumes::handle_reanalyze_resume),
        )
        // Job API
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job).delete(jobs::handle_delete_job),
        )
        // Matching API
        .route(
            "/api/v1/matches",
            post(analysis::handle_match_jobs).get(analysis::handle_list_matches),
        )
        .route("/api/v1/dashboard", get(analysis::handle_dashboard))
        .route("/api/v1/data", delete(analysis::handle_clear_data))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
