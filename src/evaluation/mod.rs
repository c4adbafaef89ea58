//! Tour evaluation: window accumulation and pluggable objectives.
//!
//! - [`WindowAccumulator`]: arrival-time bookkeeping shared by objectives and operators
//! - [`Objective`]: cost contract, with [`FeasibilityObjective`] and [`TimeObjective`]

mod objective;
mod window;

pub use objective::{FeasibilityObjective, Objective, TimeObjective};
pub use window::{evaluate_windows, simulate, Evaluation, WindowAccumulator, WindowReport};
