//! Axum route handler for submitting CVs for analysis.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend_client::{AnalysisSubmission, CvFile};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisAccepted, JobPrompt};
use crate::sessions::INVALID_TOTAL_MESSAGE;
use crate::state::AppState;
use crate::submission::{is_pdf, weighted_criteria};

/// POST /api/v1/sessions/:id/submit
///
/// Multipart body: one or more `files` parts (PDF CVs) and an optional
/// `job_description` text part. Refused while the session's weights do not
/// add up to 100.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisAccepted>, AppError> {
    let allocator = state
        .sessions
        .read(session_id, |allocator| {
            if allocator.is_valid() {
                Ok(allocator.clone())
            } else {
                Err(AppError::UnprocessableEntity(
                    INVALID_TOTAL_MESSAGE.to_string(),
                ))
            }
        })
        .await?;

    let mut files = Vec::new();
    let mut job_description = String::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("files") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if is_pdf(&filename) {
                    files.push(CvFile { filename, bytes });
                } else {
                    debug!("Skipping non-PDF upload '{filename}'");
                }
            }
            Some("job_description") => {
                job_description = field.text().await.map_err(multipart_error)?;
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }

    if files.is_empty() {
        return Err(AppError::Validation(
            "At least one PDF CV is required".to_string(),
        ));
    }

    let catalog = state.backend.list_criteria().await?;
    let criteria = weighted_criteria(&allocator, &catalog)?;

    info!(
        "Submitting {} CV(s) with {} weighted criteria",
        files.len(),
        criteria.len()
    );

    let accepted = state
        .backend
        .analyze_cvs(AnalysisSubmission {
            files,
            criteria,
            prompt: JobPrompt { job_description },
        })
        .await?;

    info!("Job analysis {} accepted", accepted.job_analysis_id);
    Ok(Json(accepted))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(err.body_text())
}
