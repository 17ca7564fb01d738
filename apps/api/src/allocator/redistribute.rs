//! Integer redistribution over an ordered slice of weights.
//!
//! Every function here works on `&mut [u32]` indexed by active-set position so
//! the rules can be tested without a map or a session around them.
//!
//! Rules for a single edit of `weights[edited]` to `value`:
//! 1. `value == 100` → edited takes everything, all others drop to 0.
//! 2. Increase while the total is already 100 → the increase is taken from the
//!    other non-zero weights ("donors") by largest remainder, proportional to
//!    each donor's weight. If donors hold less than the increase, the edit is
//!    clamped to what they can supply.
//! 3. Anything else → apply the edit and rescale the others by
//!    `(100 - value) / sum(others)`, rounding each to nearest. The rounding
//!    residual lands on the last other weight (clamped at 0, spilling
//!    backwards if needed).
//! 4. Others all 0 when a rescale is needed → collapse, total stays < 100.

use serde::Serialize;

/// The sum every settled weight map must reach.
pub const TOTAL_WEIGHT: u32 = 100;

/// What a single-weight edit ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditOutcome {
    /// Total is exactly 100.
    Balanced,
    /// Donors could not cover the whole increase; the edit stopped at `applied`.
    Clamped { requested: u32, applied: u32 },
    /// No other weight could absorb the change; total left at `total`.
    Collapsed { total: u32 },
}

/// Applies `weights[edited] = value` and rebalances the rest.
///
/// Callers guarantee `edited < weights.len()` and `value <= TOTAL_WEIGHT`.
pub fn apply_edit(weights: &mut [u32], edited: usize, value: u32) -> EditOutcome {
    debug_assert!(edited < weights.len());
    debug_assert!(value <= TOTAL_WEIGHT);

    // A lone criterion carries the whole budget.
    if weights.len() == 1 {
        weights[0] = TOTAL_WEIGHT;
        return EditOutcome::Balanced;
    }

    let old = weights[edited];
    let total: u32 = weights.iter().sum();

    if value == TOTAL_WEIGHT {
        saturate(weights, edited);
        return EditOutcome::Balanced;
    }

    if value > old && total == TOTAL_WEIGHT {
        return take_from_donors(weights, edited, value - old);
    }

    weights[edited] = value;
    rescale_others(weights, edited)
}

/// Edited criterion gets 100, everything else 0.
fn saturate(weights: &mut [u32], edited: usize) {
    for (i, w) in weights.iter_mut().enumerate() {
        *w = if i == edited { TOTAL_WEIGHT } else { 0 };
    }
}

/// Moves up to `delta` points from the donors onto `weights[edited]`.
///
/// Assumes the slice currently sums to 100, so the donors together hold
/// exactly `100 - weights[edited]`.
fn take_from_donors(weights: &mut [u32], edited: usize, delta: u32) -> EditOutcome {
    let old = weights[edited];
    let room: u32 = weights
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != edited)
        .map(|(_, w)| *w)
        .sum();
    let granted = delta.min(room);

    if granted > 0 {
        let donors: Vec<usize> = (0..weights.len())
            .filter(|&i| i != edited && weights[i] > 0)
            .collect();
        let cuts = apportion(granted, &donors, weights, room);
        for (&i, cut) in donors.iter().zip(cuts) {
            weights[i] -= cut;
        }
    }
    weights[edited] = old + granted;

    if granted < delta {
        EditOutcome::Clamped {
            requested: old + delta,
            applied: old + granted,
        }
    } else {
        EditOutcome::Balanced
    }
}

/// Largest-remainder split of `amount` across `donors`, proportional to their
/// weights out of `room` (their combined weight).
///
/// Ties on the remainder go to the donor later in active order, so repeated
/// edits keep pushing rounding onto the same tail criterion.
/// Requires `amount <= room`; then no cut exceeds its donor's weight.
fn apportion(amount: u32, donors: &[usize], weights: &[u32], room: u32) -> Vec<u32> {
    let mut cuts = Vec::with_capacity(donors.len());
    let mut remainders = Vec::with_capacity(donors.len());

    for (slot, &i) in donors.iter().enumerate() {
        let product = amount * weights[i];
        cuts.push(product / room);
        remainders.push((product % room, slot));
    }

    let floored: u32 = cuts.iter().sum();
    let leftover = (amount - floored) as usize;

    // remainder desc, then later slot first
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    for &(_, slot) in remainders.iter().take(leftover) {
        cuts[slot] += 1;
    }

    cuts
}

/// Scales every weight except `edited` so the slice sums to 100 again.
fn rescale_others(weights: &mut [u32], edited: usize) -> EditOutcome {
    let value = weights[edited];
    let others_sum: u32 = weights
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != edited)
        .map(|(_, w)| *w)
        .sum();

    if value + others_sum == TOTAL_WEIGHT {
        return EditOutcome::Balanced;
    }
    if others_sum == 0 {
        return EditOutcome::Collapsed { total: value };
    }

    let available = TOTAL_WEIGHT - value;
    let mut scaled_sum = 0;
    for (i, w) in weights.iter_mut().enumerate() {
        if i != edited {
            *w = round_div(*w * available, others_sum);
            scaled_sum += *w;
        }
    }

    let residual = i64::from(available) - i64::from(scaled_sum);
    if residual != 0 {
        settle_residual(weights, edited, residual);
    }

    EditOutcome::Balanced
}

/// Puts the rounding residual on the last non-edited weight. A negative
/// residual larger than that weight keeps walking backwards.
fn settle_residual(weights: &mut [u32], edited: usize, residual: i64) {
    let mut others = (0..weights.len()).rev().filter(|&i| i != edited);

    if residual > 0 {
        if let Some(last) = others.next() {
            weights[last] += residual as u32;
        }
        return;
    }

    let mut owed = residual.unsigned_abs() as u32;
    for i in others {
        if owed == 0 {
            break;
        }
        let cut = owed.min(weights[i]);
        weights[i] -= cut;
        owed -= cut;
    }
}

/// Integer division rounding half up, matching `Math.round` on positives.
fn round_div(numerator: u32, denominator: u32) -> u32 {
    (2 * numerator + denominator) / (2 * denominator)
}

/// `floor(100 / n)` each, remainder on the last slot.
pub fn equal_split(n: usize) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }
    let n32 = n as u32;
    let base = TOTAL_WEIGHT / n32;
    let remainder = TOTAL_WEIGHT % n32;
    let mut split = vec![base; n];
    split[n - 1] += remainder;
    split
}
