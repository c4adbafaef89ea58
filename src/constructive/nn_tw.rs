//! Time-window-aware nearest-neighbor construction.
//!
//! # Algorithm
//!
//! Starts at the first visit and repeatedly appends the nearest unvisited
//! visit whose window can still be met (arrival ≤ max). When no such visit
//! remains, the nearest unvisited visit overall is appended and its
//! lateness is left for local search to repair. A fixed last visit is
//! appended at the end.
//!
//! # Complexity
//!
//! O(n²) where n = number of visits.
//!
//! # Reference
//!
//! Solomon, M.M. (1987). "Algorithms for the Vehicle Routing and Scheduling
//! Problems with Time Window Constraints", *Operations Research* 35(2), 254-265.

use crate::error::TourError;
use crate::evaluation::WindowAccumulator;
use crate::models::TsptwProblem;
use crate::tour::Tour;

/// Builds an initial tour over every visit of the problem.
///
/// The tour starts at the problem's first visit, ends at its fixed last
/// visit if there is one, and is closed for closed problems.
///
/// # Examples
///
/// ```
/// use u_tour::constructive::nearest_neighbor_tour;
/// use u_tour::models::{TimeWindow, TsptwProblem};
/// use u_tour::times::TimeMatrix;
///
/// let windows = vec![
///     TimeWindow::unbounded(),
///     TimeWindow::new(0.0, 100.0).unwrap(),
///     TimeWindow::new(0.0, 15.0).unwrap(),
/// ];
/// let problem = TsptwProblem::closed(0, TimeMatrix::uniform(3, 10.0), windows).unwrap();
///
/// let tour = nearest_neighbor_tour(&problem).unwrap();
/// assert_eq!(tour.to_vec(), vec![0, 1, 2]);
/// assert!(tour.is_closed());
/// ```
pub fn nearest_neighbor_tour(problem: &TsptwProblem) -> Result<Tour, TourError> {
    let n = problem.visit_count();
    let first = problem.first();
    let fixed_last = problem.fixed_last();

    let mut remaining: Vec<usize> = (0..n)
        .filter(|&v| v != first && Some(v) != fixed_last)
        .collect();
    let mut reachable = Vec::with_capacity(remaining.len());

    let mut order = Vec::with_capacity(n);
    order.push(first);
    let mut acc = WindowAccumulator::new(problem);
    acc.arrive(first);
    let mut current = first;

    while !remaining.is_empty() {
        // Visits whose window can still be met from here
        reachable.clear();
        reachable.extend(remaining.iter().copied().filter(|&v| {
            acc.time() + problem.travel_time(current, v) <= problem.window(v).max()
        }));
        let pool = if reachable.is_empty() {
            &remaining
        } else {
            &reachable
        };
        let Some(next) = problem.times().nearest(current, pool) else {
            break;
        };
        remaining.retain(|&v| v != next);
        acc.arrive(next);
        order.push(next);
        current = next;
    }

    if let Some(last) = fixed_last {
        order.push(last);
    }
    let tour = Tour::new(order, problem.last())?;
    tracing::debug!(
        visits = tour.len(),
        violated_time = acc.violated_time(),
        "nearest-neighbor tour built"
    );
    Ok(tour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{FeasibilityObjective, Objective};
    use crate::models::TimeWindow;
    use crate::times::TimeMatrix;

    fn line_times(n: usize) -> TimeMatrix {
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs() * 10.0).collect())
            .collect();
        TimeMatrix::from_rows(rows).expect("square")
    }

    #[test]
    fn test_nn_follows_line() {
        let p = TsptwProblem::open(0, line_times(5), vec![TimeWindow::unbounded(); 5])
            .expect("valid");
        let tour = nearest_neighbor_tour(&p).expect("built");
        assert_eq!(tour.to_vec(), vec![0, 1, 2, 3, 4]);
        assert!(!tour.is_closed());
    }

    #[test]
    fn test_nn_skips_closed_window() {
        // Visit 1 closes before anyone can reach it, so 2 and 3 go first.
        let mut windows = vec![TimeWindow::unbounded(); 4];
        windows[1] = TimeWindow::new(0.0, 5.0).expect("valid");
        let p = TsptwProblem::open(0, line_times(4), windows).expect("valid");
        let tour = nearest_neighbor_tour(&p).expect("built");
        assert_eq!(tour.to_vec(), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_nn_falls_back_when_nothing_reachable() {
        let mut windows = vec![TimeWindow::new(0.0, 5.0).expect("valid"); 3];
        windows[0] = TimeWindow::unbounded();
        let p = TsptwProblem::open(0, line_times(3), windows).expect("valid");
        let tour = nearest_neighbor_tour(&p).expect("built");
        assert_eq!(tour.to_vec(), vec![0, 1, 2]);
        assert!(FeasibilityObjective.calculate(&p, &tour) > 0.0);
    }

    #[test]
    fn test_nn_fixed_last() {
        let p = TsptwProblem::new(
            0,
            Some(1),
            line_times(4),
            vec![TimeWindow::unbounded(); 4],
        )
        .expect("valid");
        let tour = nearest_neighbor_tour(&p).expect("built");
        assert_eq!(tour.to_vec(), vec![0, 2, 3, 1]);
        assert_eq!(tour.fixed_last(), Some(1));
    }

    #[test]
    fn test_nn_closed_single_visit() {
        let p = TsptwProblem::closed(0, TimeMatrix::uniform(1, 0.0), vec![TimeWindow::unbounded()])
            .expect("valid");
        let tour = nearest_neighbor_tour(&p).expect("built");
        assert_eq!(tour.to_vec(), vec![0]);
        assert!(tour.is_closed());
    }
}
