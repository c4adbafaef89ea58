//! Operator contracts shared by all local search moves.

use rand::Rng;

use crate::error::TourError;
use crate::evaluation::Objective;
use crate::models::TsptwProblem;
use crate::tour::Tour;

/// Result of one operator application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// `true` iff the tour was improved.
    pub improved: bool,
    /// Fitness before minus fitness after; strictly positive iff `improved`.
    pub delta: f64,
}

impl MoveResult {
    /// No move was made.
    pub fn none() -> Self {
        Self {
            improved: false,
            delta: 0.0,
        }
    }

    /// Classifies a committed move by its fitness delta.
    pub fn from_delta(delta: f64) -> Self {
        Self {
            improved: delta > 0.0,
            delta,
        }
    }
}

/// Caller-owned scratch state for operator applications.
///
/// Operators take `&self`, so one operator instance can be shared between
/// workers; each worker owns its context (and its tour).
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    valid: Vec<bool>,
    candidates: Vec<(usize, usize)>,
    order: Vec<usize>,
}

impl SearchContext {
    /// Creates an empty context; buffers grow on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// The validity flags buffer, sized to at least `visit_count`.
    ///
    /// Its contents are only meaningful right after a detailed evaluation
    /// and are invalidated by any tour mutation.
    pub fn valid_flags(&mut self, visit_count: usize) -> &mut [bool] {
        if self.valid.len() < visit_count {
            self.valid.resize(visit_count, true);
        }
        &mut self.valid[..visit_count]
    }

    /// Validity of a visit as of the last detailed evaluation.
    pub fn is_valid(&self, visit: usize) -> bool {
        self.valid.get(visit).copied().unwrap_or(true)
    }

    pub(crate) fn take_candidates(&mut self) -> Vec<(usize, usize)> {
        let mut candidates = std::mem::take(&mut self.candidates);
        candidates.clear();
        candidates
    }

    pub(crate) fn restore_candidates(&mut self, candidates: Vec<(usize, usize)>) {
        self.candidates = candidates;
    }

    pub(crate) fn order_mut(&mut self) -> &mut Vec<usize> {
        &mut self.order
    }
}

/// A local search move type.
///
/// `apply` attempts a single improving edit and commits it to the tour.
/// Operators must be deterministic for identical inputs.
pub trait Operator<O: Objective>: Send + Sync {
    /// Stable identifier used in diagnostics.
    fn name(&self) -> &str;

    /// Returns `true` if the operator can work with the given objective.
    fn supports(&self, _objective: &O) -> bool {
        true
    }

    /// Tries one improving edit.
    ///
    /// Errors only signal structural tour failures; "no improving move" is
    /// `Ok(MoveResult::none())`.
    fn apply(
        &self,
        problem: &TsptwProblem,
        objective: &O,
        tour: &mut Tour,
        ctx: &mut SearchContext,
    ) -> Result<MoveResult, TourError>;
}

/// A random perturbation used to escape local optima.
pub trait Perturber {
    /// Stable identifier used in diagnostics.
    fn name(&self) -> &str;

    /// Perturbs the tour with the given strength and returns the number of
    /// edits made.
    fn perturb<R: Rng>(
        &self,
        problem: &TsptwProblem,
        tour: &mut Tour,
        level: usize,
        rng: &mut R,
    ) -> Result<usize, TourError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_result() {
        assert!(!MoveResult::none().improved);
        assert!(MoveResult::from_delta(0.5).improved);
        assert!(!MoveResult::from_delta(0.0).improved);
        assert!(!MoveResult::from_delta(-1.0).improved);
    }

    #[test]
    fn test_valid_flags_grow() {
        let mut ctx = SearchContext::new();
        assert_eq!(ctx.valid_flags(3).len(), 3);
        ctx.valid_flags(3)[1] = false;
        assert!(!ctx.is_valid(1));
        assert_eq!(ctx.valid_flags(5).len(), 5);
        assert!(!ctx.is_valid(1));
        assert!(ctx.is_valid(42));
        assert_eq!(ctx.valid_flags(2).len(), 2);
    }
}
