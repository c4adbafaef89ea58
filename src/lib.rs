//! # u-tour
//!
//! Tour representation and local search for the traveling salesman problem
//! with time windows (TSPTW), including the single-trip subproblems of
//! multi-trip routing solvers.
//!
//! ## Modules
//!
//! - [`tour`]: Linked visit sequence with O(1) shift and lazy views
//! - [`times`]: Travel-time matrix
//! - [`models`]: Time windows, problem data and capacity contracts
//! - [`evaluation`]: Window accumulation and pluggable objectives
//! - [`local_search`]: Operators (time-window 1-shift, Or-opt) and descent
//! - [`constructive`]: Initial tour construction
//! - [`error`]: Error types

pub mod constructive;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod times;
pub mod tour;
