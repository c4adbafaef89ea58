//! Mutable tour representation.
//!
//! A [`Tour`] stores its visits as a doubly linked list over visit ids, so
//! [`Tour::shift_after`], [`Tour::insert_after`] and [`Tour::remove`] are
//! O(1). Enumeration walks the successor links from [`Tour::first`].
//!
//! Objectives read tours through [`TourView`], which is also implemented by
//! the speculative [`ShiftedTour`] overlay and by [`VisitSlice`], so
//! candidate edits can be costed without touching the tour.

mod iter;
mod pairs;
mod sequences;
mod shifted;

pub use iter::Iter;
pub use pairs::{pairs, Pair, Pairs};
pub use sequences::{sequences, Sequences};
pub use shifted::{ShiftedIter, ShiftedTour};

use crate::error::TourError;

const NONE: usize = usize::MAX;

/// Read-only, ordered access to the visits of a tour.
pub trait TourView {
    /// Visits in tour order, starting at the first visit. Closed tours do
    /// not repeat the first visit at the end.
    fn visits(&self) -> impl Iterator<Item = usize> + '_;

    /// Number of visits.
    fn len(&self) -> usize;

    /// Returns `true` if the tour returns to its first visit.
    fn is_closed(&self) -> bool {
        false
    }

    /// Returns `true` if there are no visits.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A borrowed visit order, used to cost candidate tours built in scratch
/// buffers.
#[derive(Debug, Clone, Copy)]
pub struct VisitSlice<'a> {
    visits: &'a [usize],
    closed: bool,
}

impl<'a> VisitSlice<'a> {
    /// Wraps a visit order.
    pub fn new(visits: &'a [usize], closed: bool) -> Self {
        Self { visits, closed }
    }
}

impl TourView for VisitSlice<'_> {
    fn visits(&self) -> impl Iterator<Item = usize> + '_ {
        self.visits.iter().copied()
    }

    fn len(&self) -> usize {
        self.visits.len()
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// An ordered sequence of unique visit ids.
///
/// The first visit is fixed. A tour is *closed* when its `last` equals its
/// first visit, and *open* otherwise; an open tour may carry a fixed last
/// visit that always stays at the end.
///
/// # Examples
///
/// ```
/// use u_tour::tour::Tour;
///
/// let mut tour = Tour::new([0, 1, 2, 3], Some(3)).unwrap();
/// tour.shift_after(2, 0).unwrap();
/// assert_eq!(tour.to_vec(), vec![0, 2, 1, 3]);
/// assert_eq!(tour.pairs().count(), 3);
/// assert!(tour.shift_after(1, 1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Tour {
    next: Vec<usize>,
    prev: Vec<usize>,
    first: usize,
    tail: usize,
    last: Option<usize>,
    count: usize,
}

impl Tour {
    /// Builds a tour from visits in order.
    ///
    /// `last` must be `None`, the first visit (closed tour) or the final
    /// visit (fixed last).
    pub fn new<I>(visits: I, last: Option<usize>) -> Result<Self, TourError>
    where
        I: IntoIterator<Item = usize>,
    {
        let visits: Vec<usize> = visits.into_iter().collect();
        let (first, tail) = match (visits.first(), visits.last()) {
            (Some(&first), Some(&tail)) => (first, tail),
            _ => return Err(TourError::Empty),
        };
        if let Some(last) = last {
            if last != first && last != tail {
                return Err(TourError::LastNotTerminal { last });
            }
        }

        let size = match visits.iter().max() {
            Some(&max) => max
                .checked_add(1)
                .ok_or(TourError::InvalidVisitId(max))?,
            None => 0,
        };
        let mut next = vec![NONE; size];
        let mut prev = vec![NONE; size];
        let mut seen = vec![false; size];
        for (idx, &visit) in visits.iter().enumerate() {
            if std::mem::replace(&mut seen[visit], true) {
                return Err(TourError::DuplicateVisit(visit));
            }
            if idx > 0 {
                let before = visits[idx - 1];
                next[before] = visit;
                prev[visit] = before;
            }
        }

        Ok(Self {
            next,
            prev,
            first,
            tail,
            last,
            count: visits.len(),
        })
    }

    /// An open tour without a fixed last visit.
    pub fn open<I: IntoIterator<Item = usize>>(visits: I) -> Result<Self, TourError> {
        Self::new(visits, None)
    }

    /// A closed tour returning to its first visit.
    pub fn closed<I: IntoIterator<Item = usize>>(visits: I) -> Result<Self, TourError> {
        let visits: Vec<usize> = visits.into_iter().collect();
        let first = visits.first().copied().ok_or(TourError::Empty)?;
        Self::new(visits, Some(first))
    }

    /// The fixed first visit.
    pub fn first(&self) -> usize {
        self.first
    }

    /// The configured last visit; equals [`first`](Self::first) when closed.
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// The fixed terminal visit of an open tour, if any.
    pub fn fixed_last(&self) -> Option<usize> {
        self.last.filter(|&last| last != self.first)
    }

    /// Returns `true` iff a last visit is defined and equals the first.
    pub fn is_closed(&self) -> bool {
        self.last == Some(self.first)
    }

    /// Number of visits.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the tour has no visits.
    ///
    /// The first visit can never be removed, so a constructed tour is
    /// never empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if `visit` is part of the tour.
    pub fn contains(&self, visit: usize) -> bool {
        visit < self.next.len() && (visit == self.first || self.prev[visit] != NONE)
    }

    /// The visit following `visit`; wraps to the first visit on closed tours.
    pub fn next(&self, visit: usize) -> Option<usize> {
        if !self.contains(visit) {
            return None;
        }
        match self.next[visit] {
            NONE if self.is_closed() => Some(self.first),
            NONE => None,
            next => Some(next),
        }
    }

    /// The visit preceding `visit`; wraps to the final visit on closed tours.
    pub fn previous(&self, visit: usize) -> Option<usize> {
        if !self.contains(visit) {
            return None;
        }
        if visit == self.first {
            return self.is_closed().then_some(self.tail);
        }
        Some(self.prev[visit])
    }

    /// The visit at the given position, O(position).
    pub fn visit_at(&self, position: usize) -> Option<usize> {
        self.iter().nth(position)
    }

    /// Enumerates the visits from the first one.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.next, self.first)
    }

    /// Collects the visits in order.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Adjacent visit pairs; includes the wrap edge on closed tours.
    pub fn pairs(&self) -> Pairs<Iter<'_>> {
        pairs(self.iter(), self.is_closed())
    }

    /// Windows of `size` consecutive visits; wraps around on closed tours
    /// when `loop_around` is set.
    pub fn sequences(&self, size: usize, loop_around: bool) -> Sequences<Iter<'_>> {
        sequences(self.iter(), size, self.is_closed(), loop_around)
    }

    /// Inserts a new visit directly after `anchor`.
    pub fn insert_after(&mut self, anchor: usize, visit: usize) -> Result<(), TourError> {
        if visit == NONE {
            return Err(TourError::InvalidVisitId(visit));
        }
        if self.contains(visit) {
            return Err(TourError::DuplicateVisit(visit));
        }
        if !self.contains(anchor) {
            return Err(TourError::VisitAbsent(anchor));
        }
        if self.fixed_last() == Some(anchor) {
            return Err(TourError::InvalidOperation(
                "cannot insert after the fixed last visit",
            ));
        }
        if visit >= self.next.len() {
            self.next.resize(visit + 1, NONE);
            self.prev.resize(visit + 1, NONE);
        }
        self.link_after(anchor, visit);
        self.count += 1;
        Ok(())
    }

    /// Removes a visit. The first and a fixed last visit cannot be removed.
    pub fn remove(&mut self, visit: usize) -> Result<(), TourError> {
        if !self.contains(visit) {
            return Err(TourError::VisitAbsent(visit));
        }
        if visit == self.first {
            return Err(TourError::InvalidOperation("cannot remove the first visit"));
        }
        if self.fixed_last() == Some(visit) {
            return Err(TourError::InvalidOperation(
                "cannot remove the fixed last visit",
            ));
        }
        self.unlink(visit);
        self.count -= 1;
        Ok(())
    }

    /// Moves `visit` to directly after `anchor`, keeping the relative order
    /// of every other visit.
    ///
    /// Fails without mutating when `visit == anchor`, either is absent,
    /// `visit` is the first or fixed last visit, or `anchor` is the fixed
    /// last visit.
    pub fn shift_after(&mut self, visit: usize, anchor: usize) -> Result<(), TourError> {
        self.check_shift(visit, anchor)?;
        if self.prev[visit] == anchor {
            return Ok(());
        }
        self.unlink(visit);
        self.link_after(anchor, visit);
        Ok(())
    }

    /// A view of this tour as if `visit` had been shifted after `anchor`.
    ///
    /// Validates exactly like [`shift_after`](Self::shift_after) but never
    /// mutates or copies the tour.
    pub fn shifted_after(&self, visit: usize, anchor: usize) -> Result<ShiftedTour<'_>, TourError> {
        self.check_shift(visit, anchor)?;
        Ok(ShiftedTour::new(self, visit, anchor))
    }

    /// Fails if the tour enumerates more than `expected` visits.
    ///
    /// Enumeration is bounded, so a corrupted (cyclic) link structure is
    /// reported instead of looping forever.
    pub fn verify(&self, expected: usize) -> Result<(), TourError> {
        if self.iter().take(expected + 1).count() > expected {
            return Err(TourError::TooManyVisits { expected });
        }
        Ok(())
    }

    /// Returns `true` if [`verify`](Self::verify) succeeds.
    pub fn try_verify(&self, expected: usize) -> bool {
        self.verify(expected).is_ok()
    }

    /// Fails unless the tour enumerates exactly the given multiset of visits.
    pub fn verify_visits(&self, expected: &[usize]) -> Result<(), TourError> {
        self.verify(expected.len())?;
        let size = expected
            .iter()
            .copied()
            .chain(self.iter())
            .max()
            .map_or(0, |m| m + 1);
        let mut balance = vec![0i64; size];
        for &visit in expected {
            balance[visit] += 1;
        }
        for visit in self.iter() {
            balance[visit] -= 1;
            if balance[visit] < 0 {
                return Err(TourError::UnexpectedVisit(visit));
            }
        }
        match balance.iter().position(|&b| b > 0) {
            Some(missing) => Err(TourError::MissingVisit(missing)),
            None => Ok(()),
        }
    }

    fn check_shift(&self, visit: usize, anchor: usize) -> Result<(), TourError> {
        if visit == anchor {
            return Err(TourError::InvalidOperation(
                "cannot shift a visit after itself",
            ));
        }
        if !self.contains(visit) {
            return Err(TourError::VisitAbsent(visit));
        }
        if !self.contains(anchor) {
            return Err(TourError::VisitAbsent(anchor));
        }
        if visit == self.first {
            return Err(TourError::InvalidOperation("cannot move the first visit"));
        }
        if let Some(last) = self.fixed_last() {
            if visit == last {
                return Err(TourError::InvalidOperation(
                    "cannot move the fixed last visit",
                ));
            }
            if anchor == last {
                return Err(TourError::InvalidOperation(
                    "cannot place a visit after the fixed last visit",
                ));
            }
        }
        Ok(())
    }

    /// Detaches a non-first visit from its neighbours.
    fn unlink(&mut self, visit: usize) {
        let before = self.prev[visit];
        let after = self.next[visit];
        self.next[before] = after;
        if after == NONE {
            self.tail = before;
        } else {
            self.prev[after] = before;
        }
        self.next[visit] = NONE;
        self.prev[visit] = NONE;
    }

    fn link_after(&mut self, anchor: usize, visit: usize) {
        let after = self.next[anchor];
        self.next[anchor] = visit;
        self.prev[visit] = anchor;
        self.next[visit] = after;
        if after == NONE {
            self.tail = visit;
        } else {
            self.prev[after] = visit;
        }
    }
}

impl TourView for Tour {
    fn visits(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter()
    }

    fn len(&self) -> usize {
        self.count
    }

    fn is_closed(&self) -> bool {
        Tour::is_closed(self)
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
