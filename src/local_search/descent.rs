//! Variable-neighborhood descent over a list of operators.
//!
//! # Algorithm
//!
//! Applies the operators in order. Whenever one improves the tour the scan
//! restarts at the first operator; the search stops when a full scan finds
//! no improvement or the iteration cap is reached.
//!
//! Improving moves are verified at a configurable sampling rate: the tour
//! must still enumerate exactly the visits it started with.

use super::operator::{Operator, SearchContext};
use crate::error::TourError;
use crate::evaluation::Objective;
use crate::models::TsptwProblem;
use crate::tour::Tour;

/// Configuration for [`LocalSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearchConfig {
    /// Maximum number of operator applications.
    pub max_iterations: usize,
    /// Verify the tour after every n-th improving move; `None` disables it.
    pub verify_every: Option<usize>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            verify_every: cfg!(debug_assertions).then_some(1),
        }
    }
}

impl LocalSearchConfig {
    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Verifies after every n-th improving move (at least every move).
    pub fn with_verify_every(mut self, n: usize) -> Self {
        self.verify_every = Some(n.max(1));
        self
    }

    /// Turns verification off.
    pub fn without_verification(mut self) -> Self {
        self.verify_every = None;
        self
    }
}

/// Outcome of a [`LocalSearch`] run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSearchResult {
    /// Objective value of the final tour.
    pub fitness: f64,
    /// Objective value of the tour passed in.
    pub initial_fitness: f64,
    /// Operator applications performed.
    pub iterations: usize,
    /// Applications that improved the tour.
    pub improvements: usize,
    /// Verification checks performed.
    pub verifications: usize,
}

/// Variable-neighborhood descent.
///
/// Operators that do not [`support`](Operator::supports) the objective are
/// skipped.
pub struct LocalSearch<O: Objective> {
    operators: Vec<Box<dyn Operator<O>>>,
    config: LocalSearchConfig,
}

impl<O: Objective> LocalSearch<O> {
    /// Creates a descent without operators.
    pub fn new(config: LocalSearchConfig) -> Self {
        Self {
            operators: Vec::new(),
            config,
        }
    }

    /// Appends an operator; earlier operators have priority.
    pub fn with_operator<P: Operator<O> + 'static>(mut self, operator: P) -> Self {
        self.operators.push(Box::new(operator));
        self
    }

    /// Names of the configured operators, in priority order.
    pub fn operator_names(&self) -> Vec<&str> {
        self.operators.iter().map(|op| op.name()).collect()
    }

    /// The configuration.
    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Runs the descent on `tour` in place.
    ///
    /// Structural failures of an operator, or a failed verification, abort
    /// the run with the error; the tour is left as it was at that point.
    pub fn run(
        &self,
        problem: &TsptwProblem,
        objective: &O,
        tour: &mut Tour,
        ctx: &mut SearchContext,
    ) -> Result<LocalSearchResult, TourError> {
        let initial_fitness = objective.calculate(problem, &*tour);
        let snapshot = self.config.verify_every.map(|_| tour.to_vec());
        let active: Vec<&dyn Operator<O>> = self
            .operators
            .iter()
            .map(|op| op.as_ref())
            .filter(|op| op.supports(objective))
            .collect();

        let mut iterations = 0;
        let mut improvements = 0;
        let mut verifications = 0;
        let mut index = 0;
        while index < active.len() && iterations < self.config.max_iterations {
            let operator = active[index];
            iterations += 1;
            let result = operator.apply(problem, objective, tour, ctx)?;
            if !result.improved {
                index += 1;
                continue;
            }

            improvements += 1;
            index = 0;
            if let (Some(every), Some(expected)) = (self.config.verify_every, &snapshot) {
                if improvements % every.max(1) == 0 {
                    verifications += 1;
                    if let Err(err) = tour.verify_visits(expected) {
                        tracing::debug!(operator = operator.name(), %err, "tour verification failed");
                        return Err(err);
                    }
                }
            }
        }

        let fitness = objective.calculate(problem, &*tour);
        tracing::debug!(
            objective = objective.name(),
            initial_fitness,
            fitness,
            iterations,
            improvements,
            "local search finished"
        );
        Ok(LocalSearchResult {
            fitness,
            initial_fitness,
            iterations,
            improvements,
            verifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{FeasibilityObjective, TimeObjective};
    use crate::local_search::operator::MoveResult;
    use crate::local_search::{OrOpt, ShiftStrategy, TimeWindowShift};
    use crate::models::TimeWindow;
    use crate::times::TimeMatrix;

    fn window(min: f64, max: f64) -> TimeWindow {
        TimeWindow::new(min, max).expect("valid window")
    }

    fn late_b_problem() -> TsptwProblem {
        let windows = vec![
            window(0.0, 100.0),
            window(0.0, 15.0),
            window(0.0, 100.0),
            window(0.0, 100.0),
        ];
        TsptwProblem::new(0, Some(3), TimeMatrix::uniform(4, 10.0), windows).expect("valid")
    }

    /// Drops visit 2 once and claims an improvement.
    struct DropVisit;

    impl<O: Objective> Operator<O> for DropVisit {
        fn name(&self) -> &str {
            "drop_visit"
        }

        fn apply(
            &self,
            _problem: &TsptwProblem,
            _objective: &O,
            tour: &mut Tour,
            _ctx: &mut SearchContext,
        ) -> Result<MoveResult, TourError> {
            if !tour.contains(2) {
                return Ok(MoveResult::none());
            }
            tour.remove(2)?;
            Ok(MoveResult::from_delta(1.0))
        }
    }

    /// Never supports anything; applying it is a bug.
    struct Unsupported;

    impl<O: Objective> Operator<O> for Unsupported {
        fn name(&self) -> &str {
            "unsupported"
        }

        fn supports(&self, _objective: &O) -> bool {
            false
        }

        fn apply(
            &self,
            _problem: &TsptwProblem,
            _objective: &O,
            _tour: &mut Tour,
            _ctx: &mut SearchContext,
        ) -> Result<MoveResult, TourError> {
            Err(TourError::InvalidOperation("unsupported operator applied"))
        }
    }

    #[test]
    fn test_repairs_late_visit() {
        let p = late_b_problem();
        let mut tour = Tour::new([0, 2, 1, 3], Some(3)).expect("valid");
        let search = LocalSearch::new(LocalSearchConfig::default().with_verify_every(1))
            .with_operator(TimeWindowShift::new());
        let result = search
            .run(&p, &FeasibilityObjective, &mut tour, &mut SearchContext::new())
            .expect("run");

        assert_eq!(result.initial_fitness, 5.0);
        assert_eq!(result.fitness, 0.0);
        assert_eq!(result.improvements, 1);
        // One improving application, then one that finds nothing.
        assert_eq!(result.iterations, 2);
        assert_eq!(result.verifications, 1);
        assert_eq!(tour.to_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_descent_never_worsens() {
        let windows = vec![
            window(0.0, 1000.0),
            window(0.0, 25.0),
            window(30.0, 45.0),
            window(0.0, 15.0),
            window(0.0, 80.0),
            window(0.0, 1000.0),
        ];
        let mut times = TimeMatrix::uniform(6, 10.0);
        times.set(0, 4, 40.0);
        times.set(4, 0, 40.0);
        let p = TsptwProblem::closed(0, times, windows).expect("valid");
        let mut tour = Tour::closed([0, 4, 2, 1, 5, 3]).expect("valid");
        let objective = TimeObjective::default();

        let search = LocalSearch::new(LocalSearchConfig::default().with_verify_every(1))
            .with_operator(TimeWindowShift::new().with_strategies(ShiftStrategy::ALL))
            .with_operator(OrOpt::default());
        let result = search
            .run(&p, &objective, &mut tour, &mut SearchContext::new())
            .expect("run");

        assert!(result.fitness <= result.initial_fitness);
        assert_eq!(result.fitness, objective.calculate(&p, &tour));
        assert_eq!(tour.first(), 0);
        assert!(tour.is_closed());
        tour.verify_visits(&[0, 1, 2, 3, 4, 5]).expect("same visits");
    }

    #[test]
    fn test_lateness_passes_never_raise_fitness() {
        let mut times = TimeMatrix::uniform(4, 1.0);
        times.set(2, 1, 100.0);
        let windows = vec![
            window(0.0, 100.0),
            window(0.0, 100.0),
            window(0.0, 1.5),
            window(0.0, 100.0),
        ];
        let p = TsptwProblem::new(0, Some(3), times, windows).expect("valid");
        let mut tour = Tour::new([0, 1, 2, 3], Some(3)).expect("valid");
        let search = LocalSearch::new(LocalSearchConfig::default())
            .with_operator(TimeWindowShift::new().with_strategies(ShiftStrategy::ALL));
        let result = search
            .run(&p, &TimeObjective::new(0.1), &mut tour, &mut SearchContext::new())
            .expect("run");
        assert_eq!(result.fitness, result.initial_fitness);
        assert_eq!(tour.to_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_iteration_cap() {
        let p = late_b_problem();
        let mut tour = Tour::new([0, 2, 1, 3], Some(3)).expect("valid");
        let search = LocalSearch::new(LocalSearchConfig::default().with_max_iterations(0))
            .with_operator(TimeWindowShift::new());
        let result = search
            .run(&p, &FeasibilityObjective, &mut tour, &mut SearchContext::new())
            .expect("run");
        assert_eq!(result.iterations, 0);
        assert_eq!(result.fitness, result.initial_fitness);
        assert_eq!(tour.to_vec(), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_verification_catches_lost_visit() {
        let p = late_b_problem();
        let mut tour = Tour::new([0, 1, 2, 3], Some(3)).expect("valid");
        let search = LocalSearch::new(LocalSearchConfig::default().with_verify_every(1))
            .with_operator(DropVisit);
        let err = search
            .run(&p, &FeasibilityObjective, &mut tour, &mut SearchContext::new())
            .expect_err("verification must fail");
        assert_eq!(err, TourError::MissingVisit(2));
    }

    #[test]
    fn test_verification_disabled() {
        let p = late_b_problem();
        let mut tour = Tour::new([0, 1, 2, 3], Some(3)).expect("valid");
        let search = LocalSearch::new(LocalSearchConfig::default().without_verification())
            .with_operator(DropVisit);
        let result = search
            .run(&p, &FeasibilityObjective, &mut tour, &mut SearchContext::new())
            .expect("run");
        assert_eq!(result.improvements, 1);
        assert_eq!(result.verifications, 0);
        assert_eq!(tour.to_vec(), vec![0, 1, 3]);
    }

    #[test]
    fn test_unsupported_operator_skipped() {
        let p = late_b_problem();
        let mut tour = Tour::new([0, 2, 1, 3], Some(3)).expect("valid");
        let search = LocalSearch::new(LocalSearchConfig::default())
            .with_operator(Unsupported)
            .with_operator(TimeWindowShift::new());
        assert_eq!(search.operator_names(), vec!["unsupported", "local_1shift_tw"]);
        let result = search
            .run(&p, &FeasibilityObjective, &mut tour, &mut SearchContext::new())
            .expect("run");
        assert_eq!(result.fitness, 0.0);
    }

    #[test]
    fn test_config_builders() {
        let config = LocalSearchConfig::default()
            .with_max_iterations(5)
            .with_verify_every(0);
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.verify_every, Some(1));
        assert_eq!(config.without_verification().verify_every, None);
    }
}
