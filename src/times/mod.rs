//! Travel-time matrix consumed by tours, objectives and operators.

mod matrix;

pub use matrix::TimeMatrix;
