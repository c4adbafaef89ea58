//! Error types for tour edits and problem construction.

use std::fmt;

/// Errors raised by structural tour edits and tour verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourError {
    /// A tour needs at least one visit.
    Empty,
    /// The visit occurs more than once.
    DuplicateVisit(usize),
    /// The visit is not part of the tour.
    VisitAbsent(usize),
    /// The id is reserved and cannot be stored in a tour.
    InvalidVisitId(usize),
    /// The edit is structurally invalid for this tour.
    InvalidOperation(&'static str),
    /// A fixed last visit must be the final visit (or the first, for a closed tour).
    LastNotTerminal { last: usize },
    /// Verification enumerated more visits than expected.
    TooManyVisits { expected: usize },
    /// Verification found a visit that was not expected.
    UnexpectedVisit(usize),
    /// Verification did not find an expected visit.
    MissingVisit(usize),
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "tour has no visits"),
            Self::DuplicateVisit(v) => write!(f, "visit {v} occurs more than once"),
            Self::VisitAbsent(v) => write!(f, "visit {v} is not part of the tour"),
            Self::InvalidVisitId(v) => write!(f, "visit id {v} is reserved"),
            Self::InvalidOperation(reason) => write!(f, "invalid operation: {reason}"),
            Self::LastNotTerminal { last } => {
                write!(f, "fixed last visit {last} does not end the tour")
            }
            Self::TooManyVisits { expected } => write!(
                f,
                "tour probably invalid: enumerates more than {expected} visits"
            ),
            Self::UnexpectedVisit(v) => write!(f, "tour probably invalid: unexpected visit {v}"),
            Self::MissingVisit(v) => write!(f, "tour probably invalid: visit {v} is missing"),
        }
    }
}

impl std::error::Error for TourError {}

/// Errors raised while assembling a [`TsptwProblem`](crate::models::TsptwProblem).
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// The travel-time matrix and the window list disagree on the visit count.
    DimensionMismatch { times: usize, windows: usize },
    /// A referenced visit does not exist in the problem.
    VisitOutOfRange { visit: usize, count: usize },
    /// A travel time is negative or not finite.
    InvalidTravelTime { from: usize, to: usize },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { times, windows } => write!(
                f,
                "time matrix covers {times} visits but {windows} windows were given"
            ),
            Self::VisitOutOfRange { visit, count } => {
                write!(f, "visit {visit} out of range for {count} visits")
            }
            Self::InvalidTravelTime { from, to } => {
                write!(f, "travel time {from} -> {to} is negative or not finite")
            }
        }
    }
}

impl std::error::Error for ProblemError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TourError::VisitAbsent(4).to_string(),
            "visit 4 is not part of the tour"
        );
        assert_eq!(
            TourError::InvalidVisitId(usize::MAX).to_string(),
            format!("visit id {} is reserved", usize::MAX)
        );
        assert!(TourError::TooManyVisits { expected: 3 }
            .to_string()
            .contains("more than 3"));
        assert_eq!(
            ProblemError::VisitOutOfRange { visit: 9, count: 4 }.to_string(),
            "visit 9 out of range for 4 visits"
        );
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&TourError::Empty);
        takes_error(&ProblemError::InvalidTravelTime { from: 0, to: 1 });
    }
}
