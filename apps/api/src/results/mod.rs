//! Ranking analysed candidates for display.

pub mod handlers;

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::analysis::CandidateResult;

/// Results as the table shows them: ranked rows plus one column per criterion.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResults {
    pub criteria_columns: Vec<String>,
    pub candidates: Vec<CandidateResult>,
}

impl RankedResults {
    pub fn new(candidates: Vec<CandidateResult>) -> Self {
        let candidates = rank_candidates(candidates);
        RankedResults {
            criteria_columns: criteria_columns(&candidates),
            candidates,
        }
    }
}

/// Highest total first; candidates without a total go last; ties by name.
/// `index` is rewritten to the 1-based rank.
pub fn rank_candidates(mut candidates: Vec<CandidateResult>) -> Vec<CandidateResult> {
    candidates.sort_by(|a, b| {
        match (a.total_score, b.total_score) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| a.candidate_name.cmp(&b.candidate_name))
    });
    for (rank, candidate) in candidates.iter_mut().enumerate() {
        candidate.index = rank as u32 + 1;
    }
    candidates
}

/// Every criterion scored for any candidate, in first-seen order.
pub fn criteria_columns(candidates: &[CandidateResult]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for score in candidates.iter().flat_map(|c| &c.scores) {
        if !columns.contains(&score.criterion) {
            columns.push(score.criterion.clone());
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::CandidateScore;

    fn candidate(name: &str, total: Option<f64>, criteria: &[&str]) -> CandidateResult {
        CandidateResult {
            index: 0,
            filename: format!("{name}.pdf"),
            candidate_name: name.to_string(),
            summary: None,
            total_score: total,
            scores: criteria
                .iter()
                .map(|c| CandidateScore {
                    criterion: c.to_string(),
                    score: 7.0,
                    explanation: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_rank_by_total_desc_with_missing_last() {
        let ranked = rank_candidates(vec![
            candidate("Carol", None, &[]),
            candidate("Alice", Some(6.5), &[]),
            candidate("Bob", Some(8.0), &[]),
            candidate("Aaron", Some(6.5), &[]),
        ]);
        let order: Vec<(&str, u32)> = ranked
            .iter()
            .map(|c| (c.candidate_name.as_str(), c.index))
            .collect();
        assert_eq!(
            order,
            vec![("Bob", 1), ("Aaron", 2), ("Alice", 3), ("Carol", 4)]
        );
    }

    #[test]
    fn test_columns_union_in_first_seen_order() {
        let candidates = vec![
            candidate("A", Some(1.0), &["Grammar", "Skills"]),
            candidate("B", Some(2.0), &["Skills", "Leadership"]),
        ];
        assert_eq!(
            criteria_columns(&candidates),
            vec!["Grammar", "Skills", "Leadership"]
        );
    }

    #[test]
    fn test_ranked_results_columns_follow_rank_order() {
        let results = RankedResults::new(vec![
            candidate("Low", Some(1.0), &["Grammar"]),
            candidate("High", Some(9.0), &["Experience"]),
        ]);
        assert_eq!(results.candidates[0].candidate_name, "High");
        assert_eq!(results.criteria_columns, vec!["Experience", "Grammar"]);
    }
}
