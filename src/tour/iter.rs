//! Enumeration over the successor links of a tour.

use super::NONE;

/// Iterator over the visits of a [`Tour`](super::Tour), first to last.
///
/// The walk is bounded by the link table size plus one, so a corrupted
/// (cyclic) tour yields more visits than it could hold instead of looping
/// forever; [`Tour::verify`](super::Tour::verify) relies on that.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    next: &'a [usize],
    current: usize,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(next: &'a [usize], first: usize) -> Self {
        Self {
            next,
            current: first,
            remaining: next.len() + 1,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.current == NONE || self.remaining == 0 {
            return None;
        }
        let visit = self.current;
        self.current = self.next[visit];
        self.remaining -= 1;
        Some(visit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.current == NONE {
            (0, Some(0))
        } else {
            (1, Some(self.remaining))
        }
    }
}

impl std::iter::FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use crate::tour::Tour;

    #[test]
    fn test_iter_matches_insertion_order() {
        let tour = Tour::open([5, 2, 8, 0]).expect("valid");
        assert_eq!(tour.iter().collect::<Vec<_>>(), vec![5, 2, 8, 0]);
        assert_eq!((&tour).into_iter().count(), 4);
    }

    #[test]
    fn test_iter_is_restartable() {
        let tour = Tour::closed([1, 0, 2]).expect("valid");
        let a: Vec<_> = tour.iter().collect();
        let b: Vec<_> = tour.iter().collect();
        assert_eq!(a, b);
        assert_eq!(a, vec![1, 0, 2]);
    }
}
