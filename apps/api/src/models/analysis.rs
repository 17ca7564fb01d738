use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// History entry from `GET /job-analyses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub id: Uuid,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAnalysisList {
    pub job_analyses: Vec<JobAnalysis>,
}

/// Response of `POST /analyze-cvs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisAccepted {
    pub job_analysis_id: Uuid,
}

/// The `prompt` part of an analysis submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPrompt {
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub criterion: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One analysed CV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    #[serde(default)]
    pub index: u32,
    pub filename: String,
    pub candidate_name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub total_score: Option<f64>,
    #[serde(default)]
    pub scores: Vec<CandidateScore>,
}

/// `GET /results/{id}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub candidates: Vec<CandidateResult>,
}
