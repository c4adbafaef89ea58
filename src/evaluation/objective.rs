//! Tour objectives.

use super::window::{evaluate_windows, WindowReport};
use crate::models::TsptwProblem;
use crate::tour::TourView;

/// A cost function over `(problem, tour)`. Lower is better.
///
/// Implementations must be pure functions of the visit order so operator
/// comparisons stay valid.
pub trait Objective {
    /// Stable identifier used in diagnostics.
    fn name(&self) -> &str;

    /// Returns `true` if an operator's reported delta must be re-derived by
    /// recomputing the fitness before and after the move.
    fn is_non_continuous(&self) -> bool {
        false
    }

    /// Fitness of the tour.
    fn calculate<T: TourView + ?Sized>(&self, problem: &TsptwProblem, tour: &T) -> f64;

    /// Fitness plus window diagnostics. `valid` is fully rewritten: one flag
    /// per visit, `false` iff the visit is reached after its window.
    fn calculate_detailed<T: TourView + ?Sized>(
        &self,
        problem: &TsptwProblem,
        tour: &T,
        valid: &mut [bool],
    ) -> WindowReport;
}

/// Fitness is the summed lateness over all visits; zero means feasible.
///
/// # Examples
///
/// ```
/// use u_tour::evaluation::{FeasibilityObjective, Objective};
/// use u_tour::models::{TimeWindow, TsptwProblem};
/// use u_tour::times::TimeMatrix;
/// use u_tour::tour::Tour;
///
/// let windows = vec![
///     TimeWindow::unbounded(),
///     TimeWindow::new(0.0, 5.0).unwrap(),
/// ];
/// let problem = TsptwProblem::open(0, TimeMatrix::uniform(2, 10.0), windows).unwrap();
/// let tour = Tour::open([0, 1]).unwrap();
/// assert_eq!(FeasibilityObjective.calculate(&problem, &tour), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityObjective;

impl Objective for FeasibilityObjective {
    fn name(&self) -> &str {
        "tsptw_feasibility"
    }

    fn calculate<T: TourView + ?Sized>(&self, problem: &TsptwProblem, tour: &T) -> f64 {
        evaluate_windows(problem, tour, None).violated_time
    }

    fn calculate_detailed<T: TourView + ?Sized>(
        &self,
        problem: &TsptwProblem,
        tour: &T,
        valid: &mut [bool],
    ) -> WindowReport {
        evaluate_windows(problem, tour, Some(valid))
    }
}

/// Fitness is the total elapsed time plus weighted lateness.
///
/// Waiting makes the fitness non-additive over edges, so the objective is
/// declared non-continuous.
#[derive(Debug, Clone, Copy)]
pub struct TimeObjective {
    violation_penalty: f64,
}

impl TimeObjective {
    /// Creates the objective with the given weight per unit of lateness.
    pub fn new(violation_penalty: f64) -> Self {
        Self { violation_penalty }
    }

    /// Weight applied per unit of lateness.
    pub fn violation_penalty(&self) -> f64 {
        self.violation_penalty
    }

    fn fitness(&self, report: &WindowReport) -> f64 {
        report.total_time + self.violation_penalty * report.violated_time
    }
}

impl Default for TimeObjective {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

impl Objective for TimeObjective {
    fn name(&self) -> &str {
        "tsptw_time"
    }

    fn is_non_continuous(&self) -> bool {
        true
    }

    fn calculate<T: TourView + ?Sized>(&self, problem: &TsptwProblem, tour: &T) -> f64 {
        self.fitness(&evaluate_windows(problem, tour, None))
    }

    fn calculate_detailed<T: TourView + ?Sized>(
        &self,
        problem: &TsptwProblem,
        tour: &T,
        valid: &mut [bool],
    ) -> WindowReport {
        let mut report = evaluate_windows(problem, tour, Some(valid));
        report.fitness = self.fitness(&report);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;
    use crate::times::TimeMatrix;
    use crate::tour::Tour;

    fn problem() -> TsptwProblem {
        let windows = vec![
            TimeWindow::new(0.0, 100.0).expect("valid"),
            TimeWindow::new(0.0, 5.0).expect("valid"),
            TimeWindow::new(50.0, 60.0).expect("valid"),
            TimeWindow::new(0.0, 100.0).expect("valid"),
        ];
        TsptwProblem::new(0, Some(3), TimeMatrix::uniform(4, 10.0), windows).expect("valid")
    }

    #[test]
    fn test_feasibility_detailed() {
        let p = problem();
        let tour = Tour::new([0, 1, 2, 3], Some(3)).expect("valid");
        let mut valid = vec![true; 4];
        let report = FeasibilityObjective.calculate_detailed(&p, &tour, &mut valid);
        assert_eq!(report.fitness, 5.0);
        assert_eq!(report.violated, 1);
        assert!(!valid[1]);
        assert_eq!(FeasibilityObjective.calculate(&p, &tour), 5.0);
        assert!(!FeasibilityObjective.is_non_continuous());
    }

    #[test]
    fn test_feasibility_on_shifted_view() {
        let p = problem();
        let tour = Tour::new([0, 2, 1, 3], Some(3)).expect("valid");
        // 0 -> 2 waits until 50, 2 -> 1 arrives at 60: 55 late.
        assert_eq!(FeasibilityObjective.calculate(&p, &tour), 55.0);
        let view = tour.shifted_after(1, 0).expect("valid");
        assert_eq!(FeasibilityObjective.calculate(&p, &view), 5.0);
    }

    #[test]
    fn test_time_objective() {
        let p = problem();
        let tour = Tour::new([0, 1, 2, 3], Some(3)).expect("valid");
        let objective = TimeObjective::new(10.0);
        assert!(objective.is_non_continuous());
        // total time 60 + 10 * 5
        assert_eq!(objective.calculate(&p, &tour), 110.0);
        let mut valid = vec![true; 4];
        let report = objective.calculate_detailed(&p, &tour, &mut valid);
        assert_eq!(report.fitness, 110.0);
        assert_eq!(report.violated_time, 5.0);
        assert_eq!(TimeObjective::default().violation_penalty(), 1000.0);
    }
}
