//! Local search operators for improving tours.
//!
//! - [`TimeWindowShift`]: single-visit relocation repairing window violations
//! - [`OrOpt`]: relocation of short visit segments
//! - [`RandomShift`]: random relocation perturbation
//! - [`LocalSearch`]: variable-neighborhood descent over operators

mod descent;
mod operator;
mod or_opt;
mod random_shift;
mod shift_tw;

pub use descent::{LocalSearch, LocalSearchConfig, LocalSearchResult};
pub use operator::{MoveResult, Operator, Perturber, SearchContext};
pub use or_opt::OrOpt;
pub use random_shift::RandomShift;
pub use shift_tw::{ShiftStrategy, TimeWindowShift};
