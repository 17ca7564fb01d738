//! Axum route handlers for the criterion catalog.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::catalog::validation::normalize_new_criterion;
use crate::errors::AppError;
use crate::models::criterion::{CriteriaList, Criterion};
use crate::sessions::SessionView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCriterionRequest {
    pub name: String,
    pub description: String,
    /// When set, the saved criterion is also activated in this session.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CreateCriterionResponse {
    pub criterion: Criterion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionView>,
}

/// GET /api/v1/criteria
pub async fn handle_list_criteria(
    State(state): State<AppState>,
) -> Result<Json<CriteriaList>, AppError> {
    let criteria = state.backend.list_criteria().await?;
    Ok(Json(CriteriaList { criteria }))
}

/// POST /api/v1/criteria
///
/// Saves a user-defined criterion in the backend catalog. Activation in a
/// session happens after the save, at weight 0, without rebalancing.
pub async fn handle_create_criterion(
    State(state): State<AppState>,
    Json(request): Json<CreateCriterionRequest>,
) -> Result<(StatusCode, Json<CreateCriterionResponse>), AppError> {
    let new_criterion = normalize_new_criterion(&request.name, &request.description)?;
    let criterion = state.backend.create_criterion(&new_criterion).await?;
    info!("Saved criterion '{}' to the catalog", criterion.name);

    let session = match request.session_id {
        Some(session_id) => {
            let name = criterion.name.clone();
            let (_, view) = state
                .sessions
                .update(session_id, |allocator| Ok(allocator.add_criterion(name)?))
                .await?;
            Some(view)
        }
        None => None,
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateCriterionResponse { criterion, session }),
    ))
}
