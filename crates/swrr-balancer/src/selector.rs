//! Smooth weighted round-robin selector.
//!
//! Every call grows each candidate's credit by its weight, picks the
//! candidate with the highest credit and debits it by the total weight.
//! Credits always sum to zero between calls, so after `total_weight`
//! calls every candidate has been picked exactly `weight` times and the
//! credit vector is back to all zeros.

use tracing::{debug, trace};

use crate::candidate::Candidate;
use crate::error::{BalancerError, BalancerResult};

/// Smooth weighted round-robin over a fixed, ordered set of candidates.
///
/// Candidates are identified by their index in the weight list passed to
/// [`Selector::new`]. That order also decides ties: among candidates
/// with equal highest credit, the earliest one wins.
///
/// Not internally synchronized. Wrap it in a
/// [`SharedSelector`](crate::SharedSelector) to select from several
/// threads.
#[derive(Debug, Clone)]
pub struct Selector {
    candidates: Vec<Candidate>,
    total_weight: i64,
}

impl Selector {
    /// Build a selector from an ordered list of positive weights.
    ///
    /// Fails with [`BalancerError::InvalidConfiguration`] if the list is
    /// empty, if any weight is zero or negative, or if the weights are
    /// too large for the credit arithmetic to stay in range.
    pub fn new(weights: &[i64]) -> BalancerResult<Self> {
        if weights.is_empty() {
            return Err(BalancerError::InvalidConfiguration(
                "weight list is empty".to_string(),
            ));
        }

        let mut total_weight: i64 = 0;
        for (idx, &weight) in weights.iter().enumerate() {
            if weight <= 0 {
                return Err(BalancerError::InvalidConfiguration(format!(
                    "weight at index {idx} must be positive, got {weight}"
                )));
            }
            total_weight = total_weight.checked_add(weight).ok_or_else(|| {
                BalancerError::InvalidConfiguration("total weight overflows i64".to_string())
            })?;
        }

        // |credit| never exceeds n * total_weight, even mid-selection.
        i64::try_from(weights.len())
            .ok()
            .and_then(|n| total_weight.checked_mul(n))
            .ok_or_else(|| {
                BalancerError::InvalidConfiguration(format!(
                    "total weight {total_weight} is too large for {} candidates",
                    weights.len()
                ))
            })?;

        let candidates = weights.iter().copied().map(Candidate::new).collect();

        debug!(
            candidates = weights.len(),
            total_weight, "built smooth weighted round-robin selector"
        );

        Ok(Self {
            candidates,
            total_weight,
        })
    }

    /// Advance every candidate, pick the one with the highest credit and
    /// debit it by the total weight. Returns the winner's index.
    ///
    /// # Panics
    ///
    /// Panics if the selector has no candidates, which construction
    /// rules out.
    pub fn select_next(&mut self) -> usize {
        assert!(
            !self.candidates.is_empty(),
            "selector invariant broken: no candidates"
        );

        for candidate in &mut self.candidates {
            candidate.advance();
        }

        let winner = self.leader();
        self.candidates[winner].settle(self.total_weight);

        debug_assert!(
            self.check_invariant().is_ok(),
            "credit sum drifted from zero: {:?}",
            self.snapshot()
        );
        trace!(
            winner,
            credit = self.candidates[winner].credit(),
            "selected candidate"
        );

        winner
    }

    /// Index of the candidate with the strictly greatest credit. A later
    /// candidate only takes over on `>`, so the earliest one wins ties.
    fn leader(&self) -> usize {
        let mut best = 0;
        for (idx, candidate) in self.candidates.iter().enumerate().skip(1) {
            if candidate.credit() > self.candidates[best].credit() {
                best = idx;
            }
        }
        best
    }

    /// Current credits in construction order. Does not mutate state.
    pub fn snapshot(&self) -> Vec<i64> {
        self.candidates.iter().map(Candidate::credit).collect()
    }

    /// Verify that the credits sum to zero.
    pub fn check_invariant(&self) -> BalancerResult<()> {
        let sum: i128 = self
            .candidates
            .iter()
            .map(|c| i128::from(c.credit()))
            .sum();
        if sum != 0 {
            return Err(BalancerError::InvariantViolation(format!(
                "credits sum to {sum}, expected 0"
            )));
        }
        Ok(())
    }

    /// An unbounded, lazily evaluated sequence of selections.
    ///
    /// Each item performs one [`select_next`](Self::select_next); bound
    /// it with `take`.
    pub fn selections(&mut self) -> Selections<'_> {
        Selections { selector: self }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false for a successfully built selector.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn weights(&self) -> Vec<i64> {
        self.candidates.iter().map(Candidate::weight).collect()
    }

    /// Sum of all weights, which is also the length of one cycle.
    pub fn total_weight(&self) -> i64 {
        self.total_weight
    }
}

/// Iterator returned by [`Selector::selections`]. Never ends.
#[derive(Debug)]
pub struct Selections<'a> {
    selector: &'a mut Selector,
}

impl Iterator for Selections<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        Some(self.selector.select_next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// One full cycle of selections from a freshly built selector.
///
/// The result has `total_weight` entries and index `i` appears exactly
/// `weights[i]` times.
pub fn cycle_plan(weights: &[i64]) -> BalancerResult<Vec<usize>> {
    let mut selector = Selector::new(weights)?;
    let len = usize::try_from(selector.total_weight()).map_err(|_| {
        BalancerError::InvalidConfiguration(format!(
            "cycle of {} selections does not fit in memory",
            selector.total_weight()
        ))
    })?;
    Ok(selector.selections().take(len).collect())
}
