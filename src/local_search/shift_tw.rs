//! Time-window 1-shift repair operator.
//!
//! # Algorithm
//!
//! Relocates single visits to repair arrival-time violations. Each
//! application runs the configured [`ShiftStrategy`] passes in order and
//! stops at the first pass that commits a move:
//!
//! 1. **Move violated backward**: for every late visit (never position 0),
//!    try placing it after each earlier visit and commit the first
//!    placement whose full objective value is strictly lower.
//! 2. **Move non-violated forward** / **backward**, **move violated
//!    forward**: same first-improvement scan over the other visit class or
//!    direction, comparing summed lateness of an overlay simulation.
//!
//! Only the first pass is enabled by default. A fixed last visit is never
//! moved and nothing is placed after it.
//!
//! With `assume_feasible`, passes over late visits are skipped and any
//! candidate that would be late anywhere is pruned, so only violation-free
//! relocations are committed.
//!
//! # Complexity
//!
//! O(v · n²) per pass where v = candidate visits and n = tour length.

use super::operator::{MoveResult, Operator, SearchContext};
use crate::error::TourError;
use crate::evaluation::{simulate, Objective, WindowAccumulator};
use crate::models::TsptwProblem;
use crate::tour::Tour;

/// One relocation pass of [`TimeWindowShift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftStrategy {
    /// Move a late visit to an earlier position.
    MoveViolatedBackward,
    /// Move an on-time visit to a later position.
    MoveNonViolatedForward,
    /// Move an on-time visit to an earlier position.
    MoveNonViolatedBackward,
    /// Move a late visit to a later position.
    MoveViolatedForward,
}

impl ShiftStrategy {
    /// All passes in their conventional priority order.
    pub const ALL: [ShiftStrategy; 4] = [
        ShiftStrategy::MoveViolatedBackward,
        ShiftStrategy::MoveNonViolatedForward,
        ShiftStrategy::MoveNonViolatedBackward,
        ShiftStrategy::MoveViolatedForward,
    ];

    /// Returns `true` if the pass relocates late visits.
    pub fn moves_violated(self) -> bool {
        matches!(
            self,
            ShiftStrategy::MoveViolatedBackward | ShiftStrategy::MoveViolatedForward
        )
    }

    /// Returns `true` if the pass relocates visits to later positions.
    pub fn is_forward(self) -> bool {
        matches!(
            self,
            ShiftStrategy::MoveNonViolatedForward | ShiftStrategy::MoveViolatedForward
        )
    }
}

/// Local 1-shift operator repairing time-window violations.
///
/// # Examples
///
/// ```
/// use u_tour::evaluation::{FeasibilityObjective, Objective};
/// use u_tour::local_search::{Operator, SearchContext, TimeWindowShift};
/// use u_tour::models::{TimeWindow, TsptwProblem};
/// use u_tour::times::TimeMatrix;
/// use u_tour::tour::Tour;
///
/// let windows = vec![
///     TimeWindow::new(0.0, 100.0).unwrap(),
///     TimeWindow::new(0.0, 15.0).unwrap(),
///     TimeWindow::new(0.0, 100.0).unwrap(),
///     TimeWindow::new(0.0, 100.0).unwrap(),
/// ];
/// let problem = TsptwProblem::new(0, Some(3), TimeMatrix::uniform(4, 10.0), windows).unwrap();
/// let mut tour = Tour::new([0, 2, 1, 3], Some(3)).unwrap();
///
/// let op = TimeWindowShift::new();
/// let result = op
///     .apply(&problem, &FeasibilityObjective, &mut tour, &mut SearchContext::new())
///     .unwrap();
/// assert!(result.improved);
/// assert_eq!(result.delta, 5.0);
/// assert_eq!(tour.to_vec(), vec![0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct TimeWindowShift {
    assume_feasible: bool,
    strategies: Vec<ShiftStrategy>,
}

impl Default for TimeWindowShift {
    fn default() -> Self {
        Self {
            assume_feasible: false,
            strategies: vec![ShiftStrategy::MoveViolatedBackward],
        }
    }
}

impl TimeWindowShift {
    /// Creates the operator with only the violated-backward pass enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only commit relocations that leave every visit on time.
    pub fn with_assume_feasible(mut self, assume_feasible: bool) -> Self {
        self.assume_feasible = assume_feasible;
        self
    }

    /// Sets which passes run, in order.
    pub fn with_strategies<I>(mut self, strategies: I) -> Self
    where
        I: IntoIterator<Item = ShiftStrategy>,
    {
        self.strategies = strategies.into_iter().collect();
        self
    }

    /// Whether violation-free relocations are required.
    pub fn assume_feasible(&self) -> bool {
        self.assume_feasible
    }

    /// The configured passes.
    pub fn strategies(&self) -> &[ShiftStrategy] {
        &self.strategies
    }

    /// Runs a single pass and commits its move, if any.
    ///
    /// The returned delta is in terms of the pass's own comparison: the
    /// objective for [`ShiftStrategy::MoveViolatedBackward`], summed
    /// lateness for the others.
    pub fn run_strategy<O: Objective>(
        &self,
        strategy: ShiftStrategy,
        problem: &TsptwProblem,
        objective: &O,
        tour: &mut Tour,
        ctx: &mut SearchContext,
    ) -> Result<MoveResult, TourError> {
        match strategy {
            ShiftStrategy::MoveViolatedBackward => {
                self.move_violated_backward(problem, objective, tour, ctx)
            }
            _ => self.relocate_by_lateness(strategy, problem, objective, tour, ctx),
        }
    }

    /// Moves the first late visit that can be improved to an earlier
    /// position, by first improvement of the objective.
    pub fn move_violated_backward<O: Objective>(
        &self,
        problem: &TsptwProblem,
        objective: &O,
        tour: &mut Tour,
        ctx: &mut SearchContext,
    ) -> Result<MoveResult, TourError> {
        let report =
            objective.calculate_detailed(problem, &*tour, ctx.valid_flags(problem.visit_count()));
        if report.violated == 0 {
            return Ok(MoveResult::none());
        }

        let fitness = report.fitness;
        let fixed_last = tour.fixed_last();
        let mut found = None;
        'search: for (position, visit) in tour.iter().enumerate().skip(1) {
            if ctx.is_valid(visit) || Some(visit) == fixed_last {
                continue;
            }
            // The direct predecessor is skipped: placing after it is a no-op.
            for anchor in tour.iter().take(position - 1) {
                let candidate = objective.calculate(problem, &tour.shifted_after(visit, anchor)?);
                if candidate < fitness {
                    found = Some((visit, anchor, fitness - candidate));
                    break 'search;
                }
            }
        }

        match found {
            Some((visit, anchor, delta)) => commit(
                tour,
                ShiftStrategy::MoveViolatedBackward,
                visit,
                anchor,
                delta,
            ),
            None => Ok(MoveResult::none()),
        }
    }

    /// Shared scan of the passes that compare summed lateness.
    ///
    /// Under a non-continuous objective a candidate must also lower the
    /// objective itself.
    fn relocate_by_lateness<O: Objective>(
        &self,
        strategy: ShiftStrategy,
        problem: &TsptwProblem,
        objective: &O,
        tour: &mut Tour,
        ctx: &mut SearchContext,
    ) -> Result<MoveResult, TourError> {
        let fixed_last = tour.fixed_last();
        let fitness = objective
            .is_non_continuous()
            .then(|| objective.calculate(problem, &*tour));
        let violated = strategy.moves_violated();

        let mut candidates = ctx.take_candidates();
        let mut acc = WindowAccumulator::new(problem);
        for (position, visit) in tour.iter().enumerate() {
            let late = acc.arrive(visit) > 0.0;
            if position > 0 && late == violated && Some(visit) != fixed_last {
                candidates.push((visit, position));
            }
        }
        let baseline = acc.violated_time();

        let mut found = None;
        'search: for &(visit, position) in &candidates {
            let (skip, take) = if strategy.is_forward() {
                (position + 1, usize::MAX)
            } else {
                (0, position - 1)
            };
            for anchor in tour.iter().skip(skip).take(take) {
                if Some(anchor) == fixed_last {
                    continue;
                }
                let shifted = tour.shifted_after(visit, anchor)?;
                let cost = simulate(problem, &shifted, self.assume_feasible).cost();
                let Some(cost) = cost.filter(|&c| c < baseline) else {
                    continue;
                };
                if fitness.is_some_and(|f| objective.calculate(problem, &shifted) >= f) {
                    continue;
                }
                found = Some((visit, anchor, baseline - cost));
                break 'search;
            }
        }
        ctx.restore_candidates(candidates);

        match found {
            Some((visit, anchor, delta)) => commit(tour, strategy, visit, anchor, delta),
            None => Ok(MoveResult::none()),
        }
    }
}

fn commit(
    tour: &mut Tour,
    strategy: ShiftStrategy,
    visit: usize,
    anchor: usize,
    delta: f64,
) -> Result<MoveResult, TourError> {
    tour.shift_after(visit, anchor)?;
    tracing::trace!(?strategy, visit, anchor, delta, "1-shift committed");
    Ok(MoveResult::from_delta(delta))
}

impl<O: Objective> Operator<O> for TimeWindowShift {
    fn name(&self) -> &str {
        "local_1shift_tw"
    }

    fn apply(
        &self,
        problem: &TsptwProblem,
        objective: &O,
        tour: &mut Tour,
        ctx: &mut SearchContext,
    ) -> Result<MoveResult, TourError> {
        let before = objective
            .is_non_continuous()
            .then(|| objective.calculate(problem, &*tour));

        for &strategy in &self.strategies {
            if self.assume_feasible && strategy.moves_violated() {
                continue;
            }
            let result = self.run_strategy(strategy, problem, objective, tour, ctx)?;
            if result.improved {
                let delta = match before {
                    Some(before) => before - objective.calculate(problem, &*tour),
                    None => result.delta,
                };
                return Ok(MoveResult::from_delta(delta));
            }
        }
        Ok(MoveResult::none())
    }
}
