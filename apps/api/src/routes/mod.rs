pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::results::handlers as results;
use crate::sessions::handlers as sessions;
use crate::state::AppState;
use crate::submission::handlers as submission;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Criterion catalog
        .route(
            "/api/v1/criteria",
            get(catalog::handle_list_criteria).post(catalog::handle_create_criterion),
        )
        // Criteria editing sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/criteria",
            post(sessions::handle_add_criterion),
        )
        .route(
            "/api/v1/sessions/:id/criteria/:name",
            delete(sessions::handle_remove_criterion),
        )
        .route(
            "/api/v1/sessions/:id/weights/:name",
            put(sessions::handle_set_weight),
        )
        .route(
            "/api/v1/sessions/:id/equalize",
            post(sessions::handle_equalize),
        )
        .route(
            "/api/v1/sessions/:id/suggestions",
            get(sessions::handle_suggestions),
        )
        .route(
            "/api/v1/sessions/:id/submit",
            post(submission::handle_submit).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Analysis history and results
        .route("/api/v1/job-analyses", get(results::handle_list_job_analyses))
        .route("/api/v1/results/:id", get(results::handle_get_results))
        .route("/api/v1/reports/pdf", post(results::handle_pdf_report))
        .with_state(state)
}
