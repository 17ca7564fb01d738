//! Criteria weight allocation.
//!
//! `WeightAllocator` keeps the active criteria and their integer weights, and
//! restores the sum-to-100 invariant after every single-weight edit.
//! `selection` is the thin layer that decides which catalog criteria can be
//! activated next.

use thiserror::Error;

pub mod redistribute;
pub mod selection;
pub mod weights;

pub use redistribute::{EditOutcome, TOTAL_WEIGHT};
pub use weights::{WeightAllocator, WeightMap};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocatorError {
    #[error("Criterion '{0}' is not active")]
    UnknownCriterion(String),

    #[error("Criterion '{0}' is already active")]
    DuplicateCriterion(String),

    #[error("Criterion name cannot be empty")]
    EmptyName,

    #[error("Weight {0} is outside 0..=100")]
    WeightOutOfRange(u32),

    #[error("No active criteria")]
    NoActiveCriteria,
}
