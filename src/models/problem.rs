//! Time-window TSP problem definition.

use serde::{Deserialize, Serialize};

use super::TimeWindow;
use crate::error::ProblemError;
use crate::times::TimeMatrix;

/// A TSP with time windows: travel times, per-visit windows, a fixed first
/// visit and an optional fixed last visit.
///
/// When `last == Some(first)` the problem is closed (the tour returns to its
/// start). Any other `last` is a fixed terminal visit of an open tour.
///
/// # Examples
///
/// ```
/// use u_tour::models::{TimeWindow, TsptwProblem};
/// use u_tour::times::TimeMatrix;
///
/// let problem = TsptwProblem::new(
///     0,
///     Some(2),
///     TimeMatrix::uniform(3, 10.0),
///     vec![TimeWindow::unbounded(); 3],
/// )
/// .unwrap();
/// assert_eq!(problem.visit_count(), 3);
/// assert_eq!(problem.fixed_last(), Some(2));
/// assert!(!problem.is_closed());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TsptwProblem {
    first: usize,
    last: Option<usize>,
    times: TimeMatrix,
    windows: Vec<TimeWindow>,
}

impl TsptwProblem {
    /// Creates a problem, validating dimensions, visit ids and travel times.
    pub fn new(
        first: usize,
        last: Option<usize>,
        times: TimeMatrix,
        windows: Vec<TimeWindow>,
    ) -> Result<Self, ProblemError> {
        let count = times.size();
        if windows.len() != count {
            return Err(ProblemError::DimensionMismatch {
                times: count,
                windows: windows.len(),
            });
        }
        for visit in std::iter::once(first).chain(last) {
            if visit >= count {
                return Err(ProblemError::VisitOutOfRange { visit, count });
            }
        }
        if let Some((from, to)) = times.find_invalid() {
            return Err(ProblemError::InvalidTravelTime { from, to });
        }
        Ok(Self {
            first,
            last,
            times,
            windows,
        })
    }

    /// An open problem without a fixed last visit.
    pub fn open(
        first: usize,
        times: TimeMatrix,
        windows: Vec<TimeWindow>,
    ) -> Result<Self, ProblemError> {
        Self::new(first, None, times, windows)
    }

    /// A closed problem returning to `first`.
    pub fn closed(
        first: usize,
        times: TimeMatrix,
        windows: Vec<TimeWindow>,
    ) -> Result<Self, ProblemError> {
        Self::new(first, Some(first), times, windows)
    }

    /// The fixed first visit.
    pub fn first(&self) -> usize {
        self.first
    }

    /// The configured last visit; equals `first` for closed problems.
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// The fixed terminal visit of an open problem, if any.
    pub fn fixed_last(&self) -> Option<usize> {
        self.last.filter(|&last| last != self.first)
    }

    /// Returns `true` if tours return to the first visit.
    pub fn is_closed(&self) -> bool {
        self.last == Some(self.first)
    }

    /// Number of visits in the problem.
    pub fn visit_count(&self) -> usize {
        self.times.size()
    }

    /// The travel-time matrix.
    pub fn times(&self) -> &TimeMatrix {
        &self.times
    }

    /// All windows, indexed by visit.
    pub fn windows(&self) -> &[TimeWindow] {
        &self.windows
    }

    /// The window of a single visit.
    ///
    /// # Panics
    ///
    /// Panics if `visit` is out of range.
    #[inline]
    pub fn window(&self, visit: usize) -> &TimeWindow {
        &self.windows[visit]
    }

    /// Travel time from `from` to `to`.
    #[inline]
    pub fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.times.get(from, to)
    }
}
