//! Capacity constraints and per-visit costs.
//!
//! These are data contracts for capacity-aware (multi-trip) solvers that
//! compose the tour operators. The tour core itself never interprets them.

use serde::{Deserialize, Serialize};

use crate::tour::TourView;

/// Well-known metric names.
pub mod metrics {
    /// Elapsed travel time.
    pub const TIME: &str = "time";
    /// Travelled distance.
    pub const DISTANCE: &str = "distance";
    /// Transported weight.
    pub const WEIGHT: &str = "weight";
}

/// An upper bound on a named metric, enforced per vehicle or trip.
///
/// # Examples
///
/// ```
/// use u_tour::models::{metrics, CapacityConstraint};
///
/// let c = CapacityConstraint::new(metrics::WEIGHT, 500.0);
/// assert!(!c.is_exceeded_by(500.0));
/// assert!(c.is_exceeded_by(500.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityConstraint {
    /// Metric this constraint bounds.
    pub name: String,
    /// Maximum allowed total.
    pub capacity: f64,
}

impl CapacityConstraint {
    /// Creates a constraint on the given metric.
    pub fn new(name: impl Into<String>, capacity: f64) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }

    /// Returns `true` if `value` is above the capacity.
    pub fn is_exceeded_by(&self, value: f64) -> bool {
        value > self.capacity
    }
}

/// Additive consumption of a named metric per visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitCosts {
    /// Metric these costs contribute to.
    pub name: String,
    /// Cost per visit, indexed by visit id.
    pub costs: Vec<f64>,
}

impl VisitCosts {
    /// Creates visit costs for the given metric.
    pub fn new(name: impl Into<String>, costs: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            costs,
        }
    }

    /// Cost of a single visit; zero for visits without an entry.
    pub fn cost(&self, visit: usize) -> f64 {
        self.costs.get(visit).copied().unwrap_or(0.0)
    }

    /// Summed cost over all visits of a tour.
    pub fn total<T: TourView + ?Sized>(&self, tour: &T) -> f64 {
        tour.visits().map(|v| self.cost(v)).sum()
    }

    /// Finds the costs for a metric by name.
    pub fn find<'a>(costs: &'a [VisitCosts], name: &str) -> Option<&'a VisitCosts> {
        costs.iter().find(|c| c.name == name)
    }
}
