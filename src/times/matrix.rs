//! Dense travel-time matrix.

use serde::{Deserialize, Serialize};

/// A dense n×n travel-time matrix stored in row-major order.
///
/// `get(i, j)` is the cost of travelling from visit `i` to visit `j`. The
/// matrix is usually produced by an external routing engine and may be
/// asymmetric.
///
/// # Examples
///
/// ```
/// use u_tour::times::TimeMatrix;
///
/// let tm = TimeMatrix::from_rows(vec![
///     vec![0.0, 4.0, 9.0],
///     vec![5.0, 0.0, 2.0],
///     vec![9.0, 3.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(tm.get(0, 1), 4.0);
/// assert_eq!(tm.get(1, 0), 5.0);
/// assert_eq!(tm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeMatrix {
    data: Vec<f64>,
    size: usize,
}

impl TimeMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix where every off-diagonal entry equals `time`.
    pub fn uniform(size: usize, time: f64) -> Self {
        let mut tm = Self::new(size);
        for from in 0..size {
            for to in 0..size {
                if from != to {
                    tm.set(from, to, time);
                }
            }
        }
        tm
    }

    /// Creates a matrix from a flat row-major buffer.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a matrix from explicit rows.
    ///
    /// Returns `None` unless every row has exactly `rows.len()` entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.into_iter().flatten().collect(),
            size,
        })
    }

    /// Returns the travel time from visit `from` to visit `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the travel time from visit `from` to visit `to`.
    pub fn set(&mut self, from: usize, to: usize, time: f64) {
        self.data[from * self.size + to] = time;
    }

    /// Number of visits covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the first entry that is negative or not finite, as `(from, to)`.
    pub fn find_invalid(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|t| !t.is_finite() || *t < 0.0)
            .map(|idx| (idx / self.size, idx % self.size))
    }

    /// Returns the candidate reachable fastest from `from`.
    ///
    /// Ties go to the earliest candidate. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform() {
        let tm = TimeMatrix::uniform(3, 10.0);
        assert_eq!(tm.get(0, 0), 0.0);
        assert_eq!(tm.get(0, 2), 10.0);
        assert_eq!(tm.get(2, 1), 10.0);
    }

    #[test]
    fn test_from_rows() {
        let tm = TimeMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).expect("valid");
        assert_eq!(tm.get(0, 1), 1.0);
        assert_eq!(tm.get(1, 0), 2.0);
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(TimeMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0]]).is_none());
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(TimeMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_find_invalid() {
        let mut tm = TimeMatrix::uniform(3, 1.0);
        assert_eq!(tm.find_invalid(), None);
        tm.set(2, 1, -1.0);
        assert_eq!(tm.find_invalid(), Some((2, 1)));
        tm.set(2, 1, 1.0);
        tm.set(0, 2, f64::NAN);
        assert_eq!(tm.find_invalid(), Some((0, 2)));
    }

    #[test]
    fn test_nearest() {
        let tm = TimeMatrix::from_rows(vec![
            vec![0.0, 5.0, 3.0],
            vec![5.0, 0.0, 1.0],
            vec![3.0, 1.0, 0.0],
        ])
        .expect("valid");
        assert_eq!(tm.nearest(0, &[1, 2]), Some(2));
        assert_eq!(tm.nearest(0, &[1]), Some(1));
        assert_eq!(tm.nearest(0, &[]), None);
        assert_eq!(TimeMatrix::uniform(3, 1.0).nearest(0, &[2, 1]), Some(2));
    }
}
