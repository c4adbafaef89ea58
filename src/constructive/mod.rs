//! Constructive heuristics for building initial tours.
//!
//! - [`nearest_neighbor_tour`]: time-window-aware nearest-neighbor (Solomon, 1987), O(n²)

mod nn_tw;

pub use nn_tw::nearest_neighbor_tour;
