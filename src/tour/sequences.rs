//! Lazy fixed-size window generation.

use std::collections::VecDeque;
use std::iter::Fuse;

/// Iterator over windows of consecutive visits, see [`sequences`].
#[derive(Debug, Clone)]
pub struct Sequences<I> {
    inner: Fuse<I>,
    size: usize,
    wrap: bool,
    window: VecDeque<usize>,
    head: Vec<usize>,
    seen: usize,
    wrapped: usize,
}

/// Generates windows of `size` consecutive visits.
///
/// An open sequence of n visits yields n-size+1 windows. A closed sequence
/// with `loop_around` yields n windows, the last ones continuing from the
/// end back to the start. Nothing is yielded when `size` is zero or exceeds
/// the visit count.
///
/// # Examples
///
/// ```
/// use u_tour::tour::sequences;
///
/// let open: Vec<_> = sequences([0, 1, 2, 3], 3, false, false).collect();
/// assert_eq!(open, vec![vec![0, 1, 2], vec![1, 2, 3]]);
///
/// let wrapped: Vec<_> = sequences([0, 1, 2], 2, true, true).collect();
/// assert_eq!(wrapped, vec![vec![0, 1], vec![1, 2], vec![2, 0]]);
/// ```
pub fn sequences<I: IntoIterator<Item = usize>>(
    visits: I,
    size: usize,
    closed: bool,
    loop_around: bool,
) -> Sequences<I::IntoIter> {
    Sequences {
        inner: visits.into_iter().fuse(),
        size,
        wrap: closed && loop_around,
        window: VecDeque::with_capacity(size),
        head: Vec::with_capacity(size.saturating_sub(1)),
        seen: 0,
        wrapped: 0,
    }
}

impl<I: Iterator<Item = usize>> Sequences<I> {
    fn emit(&mut self) -> Vec<usize> {
        let out = self.window.iter().copied().collect();
        self.window.pop_front();
        out
    }
}

impl<I: Iterator<Item = usize>> Iterator for Sequences<I> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.size == 0 {
            return None;
        }
        while self.window.len() < self.size {
            match self.inner.next() {
                Some(visit) => {
                    self.seen += 1;
                    if self.wrap && self.head.len() < self.size - 1 {
                        self.head.push(visit);
                    }
                    self.window.push_back(visit);
                }
                None => break,
            }
        }
        if self.window.len() == self.size {
            return Some(self.emit());
        }

        // Main pass exhausted; continue through the saved head.
        if !self.wrap || self.seen < self.size || self.wrapped >= self.head.len() {
            return None;
        }
        self.window.push_back(self.head[self.wrapped]);
        self.wrapped += 1;
        Some(self.emit())
    }
}
