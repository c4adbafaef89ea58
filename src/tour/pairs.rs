//! Lazy adjacent-pair generation.

use std::iter::Fuse;

/// An ordered edge between two adjacent visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    /// Visit the edge leaves.
    pub from: usize,
    /// Visit the edge enters.
    pub to: usize,
}

impl Pair {
    /// Creates a new edge.
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Iterator over the edges of a visit sequence, see [`pairs`].
#[derive(Debug, Clone)]
pub struct Pairs<I> {
    inner: Fuse<I>,
    closed: bool,
    first: Option<usize>,
    previous: Option<usize>,
    wrapped: bool,
}

/// Generates the edges of a visit sequence: n-1 edges for an open sequence
/// of n visits, n for a closed one (the last edge returns to the first).
///
/// # Examples
///
/// ```
/// use u_tour::tour::{pairs, Pair};
///
/// let edges: Vec<Pair> = pairs([0, 1, 2], true).collect();
/// assert_eq!(edges, vec![Pair::new(0, 1), Pair::new(1, 2), Pair::new(2, 0)]);
/// assert_eq!(pairs([0, 1, 2], false).count(), 2);
/// ```
pub fn pairs<I: IntoIterator<Item = usize>>(visits: I, closed: bool) -> Pairs<I::IntoIter> {
    Pairs {
        inner: visits.into_iter().fuse(),
        closed,
        first: None,
        previous: None,
        wrapped: false,
    }
}

impl<I: Iterator<Item = usize>> Iterator for Pairs<I> {
    type Item = Pair;

    fn next(&mut self) -> Option<Pair> {
        loop {
            match self.inner.next() {
                Some(visit) => match self.previous.replace(visit) {
                    Some(from) => return Some(Pair::new(from, visit)),
                    None => self.first = Some(visit),
                },
                None => {
                    if !self.closed || self.wrapped {
                        return None;
                    }
                    self.wrapped = true;
                    return self.previous.zip(self.first).map(|(from, to)| Pair::new(from, to));
                }
            }
        }
    }
}
