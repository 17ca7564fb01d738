//! Turning a settled allocator into an analysis submission.
//!
//! Only criteria carrying weight are sent, each with its weight on the
//! backend's 0.0–1.0 scale. The backend renormalises if it needs to.

pub mod handlers;

use crate::allocator::{WeightAllocator, TOTAL_WEIGHT};
use crate::errors::AppError;
use crate::models::criterion::{Criterion, WeightedCriterion};

/// Converts an integer percentage to the wire scale.
pub fn to_decimal(weight: u32) -> f64 {
    f64::from(weight) / f64::from(TOTAL_WEIGHT)
}

/// Active criteria with weight > 0, in active order, joined with the catalog by name.
pub fn weighted_criteria(
    allocator: &WeightAllocator,
    catalog: &[Criterion],
) -> Result<Vec<WeightedCriterion>, AppError> {
    allocator
        .weights()
        .iter()
        .filter(|(_, weight)| **weight > 0)
        .map(|(name, &weight)| {
            let criterion = catalog.iter().find(|c| &c.name == name).ok_or_else(|| {
                AppError::Validation(format!(
                    "Criterion '{name}' is not in the catalog; save it before submitting"
                ))
            })?;
            Ok(WeightedCriterion {
                id: criterion.id,
                name: criterion.name.clone(),
                description: criterion.description.clone(),
                weight: to_decimal(weight),
            })
        })
        .collect()
}

/// The uploader only forwards PDFs.
pub fn is_pdf(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(id: i64, name: &str) -> Criterion {
        Criterion {
            id: Some(id),
            name: name.to_string(),
            description: format!("How well the CV shows {name}"),
        }
    }

    #[test]
    fn test_zero_weights_excluded_and_scaled() {
        let catalog = vec![
            criterion(1, "Grammar"),
            criterion(2, "Experience"),
            criterion(3, "Skills"),
        ];
        let mut allocator =
            WeightAllocator::with_criteria(["Experience", "Grammar", "Skills"]).unwrap();
        allocator.set_weight("Experience", 100).unwrap();
        allocator.set_weight("Skills", 25).unwrap();

        let payload = weighted_criteria(&allocator, &catalog).unwrap();
        let summary: Vec<(&str, f64, Option<i64>)> = payload
            .iter()
            .map(|c| (c.name.as_str(), c.weight, c.id))
            .collect();
        assert_eq!(
            summary,
            vec![("Experience", 0.75, Some(2)), ("Skills", 0.25, Some(3))]
        );
    }

    #[test]
    fn test_unknown_criterion_cannot_be_submitted() {
        let allocator = WeightAllocator::with_criteria(["Grammar", "Vibes"]).unwrap();
        let err = weighted_criteria(&allocator, &[criterion(1, "Grammar")]).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m.contains("Vibes")));
    }

    #[test]
    fn test_decimal_scale() {
        assert_eq!(to_decimal(100), 1.0);
        assert_eq!(to_decimal(0), 0.0);
        assert_eq!(to_decimal(34), 0.34);
    }

    #[test]
    fn test_pdf_filter() {
        assert!(is_pdf("jane_doe.pdf"));
        assert!(is_pdf("CV.PDF"));
        assert!(!is_pdf("notes.docx"));
        assert!(!is_pdf("pdf"));
    }
}
