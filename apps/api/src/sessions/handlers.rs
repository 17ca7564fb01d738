//! Axum route handlers for criteria editing sessions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::allocator::selection::{available_criteria, SelectionQuery};
use crate::allocator::{EditOutcome, WeightAllocator};
use crate::errors::AppError;
use crate::models::criterion::Criterion;
use crate::sessions::SessionView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// Initial criteria, split evenly. Empty starts a blank session.
    #[serde(default)]
    pub criteria: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddCriterionRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetWeightRequest {
    pub weight: u32,
}

#[derive(Debug, Serialize)]
pub struct SetWeightResponse {
    pub outcome: EditOutcome,
    pub session: SessionView,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    #[serde(default)]
    pub q: String,
}

/// Either catalog matches to pick from, or the name the user wants to create.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionsResponse {
    Matches { criteria: Vec<Criterion> },
    Create { name: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// An empty body starts a blank session; a body that is present must be a
/// valid `CreateSessionRequest`.
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let request = parse_create_request(&body)?;
    let allocator = WeightAllocator::with_criteria(request.criteria)?;
    let view = state.sessions.create(allocator).await;
    Ok((StatusCode::CREATED, Json(view)))
}

fn parse_create_request(body: &[u8]) -> Result<CreateSessionRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateSessionRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid session request: {e}")))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.view(session_id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/criteria
///
/// Activates a catalog criterion at weight 0. The other weights are left
/// alone. New names go through `POST /api/v1/criteria` first.
pub async fn handle_add_criterion(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AddCriterionRequest>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.view(session_id).await?;

    let catalog = state.backend.list_criteria().await?;
    if !catalog.iter().any(|c| c.name == request.name) {
        return Err(AppError::Validation(format!(
            "Criterion '{}' is not in the catalog",
            request.name
        )));
    }

    let (_, view) = state
        .sessions
        .update(session_id, |allocator| Ok(allocator.add_criterion(request.name)?))
        .await?;
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id/criteria/:name
///
/// Deactivates a criterion. Its weight is not redistributed.
pub async fn handle_remove_criterion(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    let (_, view) = state
        .sessions
        .update(session_id, |allocator| Ok(allocator.remove_criterion(&name)?))
        .await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/weights/:name
pub async fn handle_set_weight(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(Uuid, String)>,
    Json(request): Json<SetWeightRequest>,
) -> Result<Json<SetWeightResponse>, AppError> {
    let (outcome, session) = state
        .sessions
        .update(session_id, |allocator| {
            Ok(allocator.edit_weight(&name, request.weight)?)
        })
        .await?;
    Ok(Json(SetWeightResponse { outcome, session }))
}

/// POST /api/v1/sessions/:id/equalize
pub async fn handle_equalize(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let (_, view) = state
        .sessions
        .update(session_id, |allocator| {
            allocator.equalize()?;
            Ok(())
        })
        .await?;
    Ok(Json(view))
}

/// GET /api/v1/sessions/:id/suggestions?q=
///
/// `q` starting with `/` asks to create a criterion; anything else filters the
/// catalog down to criteria not yet active in the session.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<SuggestionsQuery>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    // 404 for a stale session before touching the backend
    state.sessions.view(session_id).await?;

    let filter = match SelectionQuery::parse(&query.q) {
        SelectionQuery::Create(name) => {
            return Ok(Json(SuggestionsResponse::Create { name }));
        }
        SelectionQuery::Filter(filter) => filter,
    };

    let catalog = state.backend.list_criteria().await?;
    let criteria = state
        .sessions
        .read(session_id, |allocator| {
            Ok(available_criteria(&catalog, allocator, &filter)
                .into_iter()
                .cloned()
                .collect())
        })
        .await?;

    Ok(Json(SuggestionsResponse::Matches { criteria }))
}
