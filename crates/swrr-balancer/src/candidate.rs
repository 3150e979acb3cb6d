//! Per-candidate credit bookkeeping.

/// A weighted candidate owned by a [`Selector`](crate::Selector).
///
/// `weight` is fixed at construction. `credit` only moves through the
/// two transitions below, both of which are crate-private.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    weight: i64,
    credit: i64,
}

impl Candidate {
    /// Callers must have validated `weight > 0`.
    pub(crate) fn new(weight: i64) -> Self {
        Self { weight, credit: 0 }
    }

    pub(crate) fn weight(&self) -> i64 {
        self.weight
    }

    pub(crate) fn credit(&self) -> i64 {
        self.credit
    }

    /// Grow credit by this candidate's weight. Runs on every candidate,
    /// every selection.
    pub(crate) fn advance(&mut self) {
        self.credit += self.weight;
    }

    /// Debit the winner by the pool's total weight.
    pub(crate) fn settle(&mut self, total_weight: i64) {
        self.credit -= total_weight;
    }
}
