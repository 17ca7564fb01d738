//! Axum route handlers for analysis history, results and the PDF report.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{CandidateResult, JobAnalysisList};
use crate::results::RankedResults;
use crate::state::AppState;

const REPORT_FILENAME: &str = "candidates-report.pdf";

#[derive(Debug, Deserialize)]
pub struct PdfReportRequest {
    pub candidates: Vec<CandidateResult>,
}

/// GET /api/v1/job-analyses
pub async fn handle_list_job_analyses(
    State(state): State<AppState>,
) -> Result<Json<JobAnalysisList>, AppError> {
    let job_analyses = state.backend.list_job_analyses().await?;
    Ok(Json(JobAnalysisList { job_analyses }))
}

/// GET /api/v1/results/:id
///
/// Candidates come back ranked by total score with the set of criterion columns.
pub async fn handle_get_results(
    State(state): State<AppState>,
    Path(job_analysis_id): Path<Uuid>,
) -> Result<Json<RankedResults>, AppError> {
    let results = state.backend.get_results(job_analysis_id).await?;
    Ok(Json(RankedResults::new(results.candidates)))
}

/// POST /api/v1/reports/pdf
///
/// Passes the candidate rows to the backend's PDF renderer and streams the
/// document back as a download.
pub async fn handle_pdf_report(
    State(state): State<AppState>,
    Json(request): Json<PdfReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.candidates.is_empty() {
        return Err(AppError::Validation(
            "At least one candidate is required".to_string(),
        ));
    }

    let pdf = state.backend.generate_pdf(&request.candidates).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        pdf,
    ))
}
