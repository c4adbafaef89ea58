//! Or-opt segment relocation.
//!
//! # Algorithm
//!
//! Tries moving segments of 1 up to `max_segment` consecutive visits to a
//! different position of the tour, keeping their order. Segment sizes are
//! scanned smallest first; the first placement with a strictly lower
//! objective value is committed.
//!
//! Segments never contain the first visit or a fixed last visit, and never
//! land after a fixed last visit.
//!
//! # Complexity
//!
//! O(k · n²) candidate evaluations per application, each O(n).
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::operator::{MoveResult, Operator, SearchContext};
use crate::error::TourError;
use crate::evaluation::Objective;
use crate::models::TsptwProblem;
use crate::tour::{Tour, VisitSlice};

/// Segment relocation operator.
#[derive(Debug, Clone, Copy)]
pub struct OrOpt {
    max_segment: usize,
}

impl Default for OrOpt {
    fn default() -> Self {
        Self { max_segment: 3 }
    }
}

impl OrOpt {
    /// Creates the operator with segments of up to `max_segment` visits.
    ///
    /// A `max_segment` of zero is treated as one.
    pub fn new(max_segment: usize) -> Self {
        Self {
            max_segment: max_segment.max(1),
        }
    }

    /// Longest segment tried.
    pub fn max_segment(&self) -> usize {
        self.max_segment
    }
}

impl<O: Objective> Operator<O> for OrOpt {
    fn name(&self) -> &str {
        "or_opt"
    }

    fn apply(
        &self,
        problem: &TsptwProblem,
        objective: &O,
        tour: &mut Tour,
        ctx: &mut SearchContext,
    ) -> Result<MoveResult, TourError> {
        if tour.len() < 3 {
            return Ok(MoveResult::none());
        }

        let fitness = objective.calculate(problem, &*tour);
        let first = tour.first();
        let fixed_last = tour.fixed_last();
        let closed = tour.is_closed();
        let pinned = |v: usize| v == first || Some(v) == fixed_last;

        let mut found = None;
        'search: for size in 1..=self.max_segment.min(tour.len() - 1) {
            for segment in tour.sequences(size, false) {
                if segment.iter().any(|&v| pinned(v)) {
                    continue;
                }
                let predecessor = tour.previous(segment[0]);
                for anchor in tour.iter() {
                    if segment.contains(&anchor)
                        || Some(anchor) == predecessor
                        || Some(anchor) == fixed_last
                    {
                        continue;
                    }

                    let order = ctx.order_mut();
                    order.clear();
                    for visit in tour.iter().filter(|v| !segment.contains(v)) {
                        order.push(visit);
                        if visit == anchor {
                            order.extend_from_slice(&segment);
                        }
                    }
                    let candidate =
                        objective.calculate(problem, &VisitSlice::new(order.as_slice(), closed));
                    if candidate < fitness {
                        found = Some((segment.clone(), anchor, fitness - candidate));
                        break 'search;
                    }
                }
            }
        }

        let Some((segment, anchor, delta)) = found else {
            return Ok(MoveResult::none());
        };
        tour.shift_after(segment[0], anchor)?;
        for pair in segment.windows(2) {
            tour.shift_after(pair[1], pair[0])?;
        }
        tracing::trace!(?segment, anchor, delta, "or-opt committed");
        Ok(MoveResult::from_delta(delta))
    }
}
