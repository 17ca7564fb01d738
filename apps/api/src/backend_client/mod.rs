/// Backend client: the single point of entry for all calls to the CV analysis backend.
///
/// ARCHITECTURAL RULE: handlers never build backend URLs themselves.
/// Every request to the analysis service goes through `AnalysisBackend`.
///
/// No retries: a failed call is reported once and the user decides what to do.
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::analysis::{
    AnalysisAccepted, AnalysisResults, CandidateResult, JobAnalysis, JobAnalysisList, JobPrompt,
};
use crate::models::criterion::{CriteriaList, Criterion, NewCriterion, WeightedCriterion};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BackendError {
    /// True when the backend rejected the request itself (4xx), as opposed to
    /// being unreachable or failing.
    pub fn is_rejection(&self) -> bool {
        matches!(self, BackendError::Api { status, .. } if (400..500).contains(status))
    }
}

/// An uploaded CV ready to forward.
#[derive(Debug, Clone)]
pub struct CvFile {
    pub filename: String,
    pub bytes: Bytes,
}

/// Everything `POST /analyze-cvs` needs.
#[derive(Debug, Clone)]
pub struct AnalysisSubmission {
    pub files: Vec<CvFile>,
    pub criteria: Vec<WeightedCriterion>,
    pub prompt: JobPrompt,
}

/// The analysis backend contract. Carried in `AppState` as `Arc<dyn AnalysisBackend>`
/// so handlers can be exercised against an in-memory double.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn list_criteria(&self) -> Result<Vec<Criterion>, BackendError>;

    async fn create_criterion(&self, criterion: &NewCriterion) -> Result<Criterion, BackendError>;

    async fn analyze_cvs(
        &self,
        submission: AnalysisSubmission,
    ) -> Result<AnalysisAccepted, BackendError>;

    async fn list_job_analyses(&self) -> Result<Vec<JobAnalysis>, BackendError>;

    async fn get_results(&self, job_analysis_id: Uuid) -> Result<AnalysisResults, BackendError>;

    async fn generate_pdf(&self, candidates: &[CandidateResult]) -> Result<Bytes, BackendError>;
}

/// FastAPI-style error body: `detail` is a string or a list of validation errors.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Value,
}

#[derive(Serialize)]
struct PdfRequest<'a> {
    candidates: &'a [CandidateResult],
}

/// reqwest-backed implementation talking to the real service.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self.client.get(self.url(path)).send().await?;
        read_json(path, response).await
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn list_criteria(&self) -> Result<Vec<Criterion>, BackendError> {
        let list: CriteriaList = self.get_json("/criteria").await?;
        Ok(list.criteria)
    }

    async fn create_criterion(&self, criterion: &NewCriterion) -> Result<Criterion, BackendError> {
        let response = self
            .client
            .post(self.url("/criteria"))
            .json(criterion)
            .send()
            .await?;
        read_json("/criteria", response).await
    }

    async fn analyze_cvs(
        &self,
        submission: AnalysisSubmission,
    ) -> Result<AnalysisAccepted, BackendError> {
        let mut form = multipart::Form::new()
            .text("criteria", serde_json::to_string(&submission.criteria)?)
            .text("prompt", serde_json::to_string(&submission.prompt)?);

        for file in submission.files {
            let part = multipart::Part::stream(file.bytes)
                .file_name(file.filename)
                .mime_str("application/pdf")?;
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(self.url("/analyze-cvs"))
            .multipart(form)
            .send()
            .await?;
        read_json("/analyze-cvs", response).await
    }

    async fn list_job_analyses(&self) -> Result<Vec<JobAnalysis>, BackendError> {
        let list: JobAnalysisList = self.get_json("/job-analyses").await?;
        Ok(list.job_analyses)
    }

    async fn get_results(&self, job_analysis_id: Uuid) -> Result<AnalysisResults, BackendError> {
        self.get_json(&format!("/results/{job_analysis_id}")).await
    }

    async fn generate_pdf(&self, candidates: &[CandidateResult]) -> Result<Bytes, BackendError> {
        let response = self
            .client
            .post(self.url("/generate-pdf"))
            .json(&PdfRequest { candidates })
            .send()
            .await?;
        let response = ensure_success("/generate-pdf", response).await?;
        Ok(response.bytes().await?)
    }
}

/// Turns non-2xx responses into `BackendError::Api` carrying the backend's `detail`.
async fn ensure_success(path: &str, response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        debug!("backend {path} returned {status}");
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("backend {path} returned {status}: {body}");
    Err(BackendError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, BackendError> {
    let response = ensure_success(path, response).await?;
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(BackendError::Parse)
}

/// Extracts a human-readable message from a backend error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Value::String(detail),
        }) => detail,
        Ok(ErrorBody {
            detail: Value::Array(items),
        }) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "Request failed".to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_string_detail() {
        let body = r#"{"detail": "Criterion already exists"}"#;
        assert_eq!(error_message(body), "Criterion already exists");
    }

    #[test]
    fn test_error_message_validation_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "name"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "description"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        assert_eq!(error_message(body), "field required; field required");
    }

    #[test]
    fn test_error_message_plain_text_and_empty() {
        assert_eq!(error_message("Internal Server Error"), "Internal Server Error");
        assert_eq!(error_message("  "), "Request failed");
    }

    #[test]
    fn test_rejection_only_for_client_errors() {
        let rejected = BackendError::Api {
            status: 422,
            message: "bad".to_string(),
        };
        let failed = BackendError::Api {
            status: 503,
            message: "down".to_string(),
        };
        assert!(rejected.is_rejection());
        assert!(!failed.is_rejection());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.url("/criteria"), "http://localhost:8000/criteria");
    }
}
