//! Problem data consumed by the tour core.
//!
//! Time windows and the TSPTW problem definition drive evaluation; capacity
//! constraints and visit costs are contracts for capacity-aware solvers
//! built on top of the operators.

mod capacity;
mod problem;
mod window;

pub use capacity::{metrics, CapacityConstraint, VisitCosts};
pub use problem::TsptwProblem;
pub use window::TimeWindow;
