#![allow(dead_code)]

use indexmap::IndexMap;
use tracing::debug;

use crate::allocator::redistribute::{apply_edit, equal_split, EditOutcome, TOTAL_WEIGHT};
use crate::allocator::AllocatorError;

/// Criterion name → integer percentage, in active-set order.
pub type WeightMap = IndexMap<String, u32>;

/// Owns the active criteria and their weights.
///
/// The map's insertion order is the active-set order: it decides which
/// criterion is "last" for equalize remainders and rounding residuals.
/// Adding or removing a criterion never rebalances on its own; callers pick
/// `equalize` or `set_weight` afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightAllocator {
    weights: WeightMap,
}

impl WeightAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates `names` in order and splits the budget evenly between them.
    pub fn with_criteria<I, S>(names: I) -> Result<Self, AllocatorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut allocator = Self::new();
        for name in names {
            allocator.add_criterion(name)?;
        }
        if !allocator.is_empty() {
            allocator.equalize()?;
        }
        Ok(allocator)
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    pub fn weight(&self, name: &str) -> Option<u32> {
        self.weights.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.weights.contains_key(name)
    }

    /// Active criterion names in order.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.weights.values().sum()
    }

    /// True when the active weights add up to exactly 100.
    pub fn is_valid(&self) -> bool {
        self.total() == TOTAL_WEIGHT
    }

    /// Activates `name` at weight 0.
    pub fn add_criterion(&mut self, name: impl Into<String>) -> Result<(), AllocatorError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AllocatorError::EmptyName);
        }
        if self.weights.contains_key(&name) {
            return Err(AllocatorError::DuplicateCriterion(name));
        }
        debug!(criterion = %name, "criterion activated");
        self.weights.insert(name, 0);
        Ok(())
    }

    /// Deactivates `name`, returning the weight it held. The freed weight is
    /// not handed to anyone.
    pub fn remove_criterion(&mut self, name: &str) -> Result<u32, AllocatorError> {
        let weight = self
            .weights
            .shift_remove(name)
            .ok_or_else(|| AllocatorError::UnknownCriterion(name.to_string()))?;
        debug!(criterion = %name, weight, "criterion deactivated");
        Ok(weight)
    }

    /// Resets every weight to `floor(100 / N)`; the remainder goes to the
    /// last active criterion.
    pub fn equalize(&mut self) -> Result<&WeightMap, AllocatorError> {
        if self.weights.is_empty() {
            return Err(AllocatorError::NoActiveCriteria);
        }
        let split = equal_split(self.weights.len());
        for (w, share) in self.weights.values_mut().zip(split) {
            *w = share;
        }
        Ok(&self.weights)
    }

    /// Sets one weight and rebalances the others; returns the full map.
    pub fn set_weight(&mut self, name: &str, value: u32) -> Result<&WeightMap, AllocatorError> {
        self.edit_weight(name, value)?;
        Ok(&self.weights)
    }

    /// Same as [`set_weight`](Self::set_weight) but reports how the edit
    /// was settled.
    pub fn edit_weight(&mut self, name: &str, value: u32) -> Result<EditOutcome, AllocatorError> {
        if value > TOTAL_WEIGHT {
            return Err(AllocatorError::WeightOutOfRange(value));
        }
        let index = self
            .weights
            .get_index_of(name)
            .ok_or_else(|| AllocatorError::UnknownCriterion(name.to_string()))?;

        let mut values: Vec<u32> = self.weights.values().copied().collect();
        let outcome = apply_edit(&mut values, index, value);
        for (w, new) in self.weights.values_mut().zip(values) {
            *w = new;
        }

        match outcome {
            EditOutcome::Balanced => {}
            EditOutcome::Clamped { requested, applied } => {
                debug!(criterion = %name, requested, applied, "weight edit clamped");
            }
            EditOutcome::Collapsed { total } => {
                debug!(criterion = %name, total, "no weight left to rebalance with");
            }
        }

        Ok(outcome)
    }
}
