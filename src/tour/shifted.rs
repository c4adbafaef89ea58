//! Speculative shift overlay.

use std::iter::Fuse;

use super::{Iter, Tour, TourView};

/// A read-only view of a [`Tour`] with one visit moved after an anchor.
///
/// The overlay stores only the patch (moved visit, anchor); its iterator
/// skips the visit at its old position and yields it right after the
/// anchor. Created by [`Tour::shifted_after`].
#[derive(Debug, Clone, Copy)]
pub struct ShiftedTour<'a> {
    tour: &'a Tour,
    visit: usize,
    anchor: usize,
}

impl<'a> ShiftedTour<'a> {
    pub(super) fn new(tour: &'a Tour, visit: usize, anchor: usize) -> Self {
        Self {
            tour,
            visit,
            anchor,
        }
    }

    /// The visit being moved.
    pub fn visit(&self) -> usize {
        self.visit
    }

    /// The visit the moved one is placed after.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Enumerates the shifted visit order.
    pub fn iter(&self) -> ShiftedIter<'a> {
        ShiftedIter {
            inner: self.tour.iter().fuse(),
            visit: self.visit,
            anchor: self.anchor,
            pending: false,
        }
    }
}

impl TourView for ShiftedTour<'_> {
    fn visits(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter()
    }

    fn len(&self) -> usize {
        self.tour.len()
    }

    fn is_closed(&self) -> bool {
        self.tour.is_closed()
    }
}

/// Iterator over a [`ShiftedTour`].
#[derive(Debug, Clone)]
pub struct ShiftedIter<'a> {
    inner: Fuse<Iter<'a>>,
    visit: usize,
    anchor: usize,
    pending: bool,
}

impl Iterator for ShiftedIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if std::mem::take(&mut self.pending) {
            return Some(self.visit);
        }
        loop {
            let current = self.inner.next()?;
            if current == self.visit {
                continue;
            }
            self.pending = current == self.anchor;
            return Some(current);
        }
    }
}
