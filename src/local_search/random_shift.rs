//! Random relocation perturbation.

use rand::Rng;

use super::operator::Perturber;
use crate::error::TourError;
use crate::models::TsptwProblem;
use crate::tour::Tour;

/// Moves `level` randomly chosen visits to random positions.
///
/// The first visit and the tour's fixed last visit never move, and no
/// visit is placed after the fixed last visit. Every edit changes the visit order.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_tour::local_search::{Perturber, RandomShift};
/// use u_tour::models::{TimeWindow, TsptwProblem};
/// use u_tour::times::TimeMatrix;
/// use u_tour::tour::Tour;
///
/// let problem = TsptwProblem::open(0, TimeMatrix::uniform(5, 1.0), vec![TimeWindow::unbounded(); 5]).unwrap();
/// let mut tour = Tour::open(0..5).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let edits = RandomShift.perturb(&problem, &mut tour, 3, &mut rng).unwrap();
/// assert_eq!(edits, 3);
/// assert_eq!(tour.first(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShift;

impl Perturber for RandomShift {
    fn name(&self) -> &str {
        "random_shift"
    }

    fn perturb<R: Rng>(
        &self,
        _problem: &TsptwProblem,
        tour: &mut Tour,
        level: usize,
        rng: &mut R,
    ) -> Result<usize, TourError> {
        let first = tour.first();
        let fixed_last = tour.fixed_last();
        let movable: Vec<usize> = tour
            .iter()
            .filter(|&v| v != first && Some(v) != fixed_last)
            .collect();
        if movable.is_empty() {
            return Ok(0);
        }

        let mut edits = 0;
        let mut anchors = Vec::with_capacity(tour.len());
        for _ in 0..level {
            let visit = movable[rng.random_range(0..movable.len() as u64) as usize];
            let predecessor = tour.previous(visit);
            anchors.clear();
            anchors.extend(
                tour.iter()
                    .filter(|&a| a != visit && Some(a) != predecessor && Some(a) != fixed_last),
            );
            if anchors.is_empty() {
                continue;
            }
            let anchor = anchors[rng.random_range(0..anchors.len() as u64) as usize];
            tour.shift_after(visit, anchor)?;
            edits += 1;
        }
        tracing::trace!(level, edits, "random shift perturbation");
        Ok(edits)
    }
}
