use serde::{Deserialize, Serialize};

/// One evaluation dimension from the backend catalog.
///
/// `name` is the join key everywhere; `id` is absent for criteria that only
/// exist locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

/// Body of `POST /criteria`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCriterion {
    pub name: String,
    pub description: String,
}

/// `GET /criteria` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaList {
    pub criteria: Vec<Criterion>,
}

/// A criterion as sent for analysis: weight on the 0.0–1.0 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCriterion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub weight: f64,
}
