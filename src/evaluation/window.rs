//! Arrival-time accumulation against visit windows.

use crate::models::TsptwProblem;
use crate::tour::TourView;

/// Window diagnostics of one tour evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowReport {
    /// Objective value; set by the objective that produced the report.
    pub fitness: f64,
    /// Number of visits reached after their window closed.
    pub violated: usize,
    /// Summed lateness over all violated visits.
    pub violated_time: f64,
    /// Summed waiting before windows opened.
    pub wait_time: f64,
    /// Elapsed time at the end of the tour, waiting included.
    pub total_time: f64,
}

/// Outcome of simulating a visit order against the windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Every visit was accumulated; the value is the summed lateness.
    Complete(f64),
    /// Pruned at the first violation; `partial` is the lateness seen so far.
    Infeasible { partial: f64 },
}

impl Evaluation {
    /// The summed lateness of a complete evaluation.
    pub fn cost(&self) -> Option<f64> {
        match self {
            Self::Complete(cost) => Some(*cost),
            Self::Infeasible { .. } => None,
        }
    }

    /// Returns `true` for a complete evaluation strictly below `baseline`.
    pub fn improves_on(&self, baseline: f64) -> bool {
        matches!(self, Self::Complete(cost) if *cost < baseline)
    }
}

/// Running arrival time along a visit order.
///
/// Arriving at a visit adds the travel time from the previous visit; a late
/// arrival counts as a violation (soft constraint), an early one waits for
/// the window to open.
///
/// # Examples
///
/// ```
/// use u_tour::evaluation::WindowAccumulator;
/// use u_tour::models::{TimeWindow, TsptwProblem};
/// use u_tour::times::TimeMatrix;
///
/// let windows = vec![
///     TimeWindow::unbounded(),
///     TimeWindow::new(0.0, 5.0).unwrap(),
///     TimeWindow::new(50.0, 60.0).unwrap(),
/// ];
/// let problem = TsptwProblem::open(0, TimeMatrix::uniform(3, 10.0), windows).unwrap();
///
/// let mut acc = WindowAccumulator::new(&problem);
/// assert_eq!(acc.arrive(0), 0.0);
/// assert_eq!(acc.arrive(1), 5.0);
/// assert_eq!(acc.arrive(2), 0.0);
/// assert_eq!(acc.time(), 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct WindowAccumulator<'a> {
    problem: &'a TsptwProblem,
    first: Option<usize>,
    previous: Option<usize>,
    time: f64,
    wait_time: f64,
    violated_time: f64,
    violated: usize,
}

impl<'a> WindowAccumulator<'a> {
    /// Starts at time zero with no previous visit.
    pub fn new(problem: &'a TsptwProblem) -> Self {
        Self {
            problem,
            first: None,
            previous: None,
            time: 0.0,
            wait_time: 0.0,
            violated_time: 0.0,
            violated: 0,
        }
    }

    /// Arrives at `visit` and returns its lateness (zero when on time).
    pub fn arrive(&mut self, visit: usize) -> f64 {
        match self.previous {
            Some(previous) => self.time += self.problem.travel_time(previous, visit),
            None => self.first = Some(visit),
        }
        let window = self.problem.window(visit);
        let late = window.violation(self.time);
        if late > 0.0 {
            self.violated_time += late;
            self.violated += 1;
        }
        let wait = window.waiting_time(self.time);
        self.wait_time += wait;
        self.time += wait;
        self.previous = Some(visit);
        late
    }

    /// Travels back to the first visit; no window applies on return.
    pub fn close(&mut self) {
        if let (Some(previous), Some(first)) = (self.previous, self.first) {
            self.time += self.problem.travel_time(previous, first);
        }
    }

    /// Elapsed time so far.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Summed lateness so far.
    pub fn violated_time(&self) -> f64 {
        self.violated_time
    }

    /// Diagnostics so far, with `fitness` set to the summed lateness.
    pub fn report(&self) -> WindowReport {
        WindowReport {
            fitness: self.violated_time,
            violated: self.violated,
            violated_time: self.violated_time,
            wait_time: self.wait_time,
            total_time: self.time,
        }
    }
}

/// Evaluates a whole tour against the windows.
///
/// When `valid` is given, every entry is reset to `true` and the entries of
/// late visits are set to `false`.
pub fn evaluate_windows<T: TourView + ?Sized>(
    problem: &TsptwProblem,
    tour: &T,
    mut valid: Option<&mut [bool]>,
) -> WindowReport {
    if let Some(flags) = valid.as_deref_mut() {
        flags.fill(true);
    }
    let mut acc = WindowAccumulator::new(problem);
    for visit in tour.visits() {
        if acc.arrive(visit) > 0.0 {
            if let Some(flags) = valid.as_deref_mut() {
                flags[visit] = false;
            }
        }
    }
    if tour.is_closed() {
        acc.close();
    }
    acc.report()
}

/// Sums the lateness of a visit order, stopping at the first violation when
/// `prune` is set.
pub fn simulate<T: TourView + ?Sized>(problem: &TsptwProblem, tour: &T, prune: bool) -> Evaluation {
    let mut acc = WindowAccumulator::new(problem);
    for visit in tour.visits() {
        if acc.arrive(visit) > 0.0 && prune {
            return Evaluation::Infeasible {
                partial: acc.violated_time(),
            };
        }
    }
    Evaluation::Complete(acc.violated_time())
}
