//! Arrival time windows.

use serde::{Deserialize, Serialize};

/// An arrival time window `[min, max]` for a visit.
///
/// Arriving before `min` means waiting until `min`. Arriving after `max` is
/// a violation; it is penalized by the objective rather than rejected, so
/// search can pass through infeasible tours.
///
/// # Examples
///
/// ```
/// use u_tour::models::TimeWindow;
///
/// let tw = TimeWindow::new(50.0, 60.0).unwrap();
/// assert!(tw.contains(55.0));
/// assert_eq!(tw.waiting_time(20.0), 30.0);
/// assert_eq!(tw.violation(65.0), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    min: f64,
    max: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `min > max` or either value is non-finite.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return None;
        }
        Some(Self { min, max })
    }

    /// A window that never forces waiting and can never be violated.
    pub fn unbounded() -> Self {
        Self {
            min: 0.0,
            max: f64::MAX,
        }
    }

    /// Earliest arrival without waiting.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Latest arrival without violation.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.min && time <= self.max
    }

    /// Time spent waiting when arriving at `arrival`.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        if arrival < self.min {
            self.min - arrival
        } else {
            0.0
        }
    }

    /// Amount by which `arrival` exceeds the window, zero when on time.
    pub fn violation(&self, arrival: f64) -> f64 {
        if arrival > self.max {
            arrival - self.max
        } else {
            0.0
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}
