//! The two current selections.

use crate::compare::{compare_stats, RowOutcome, Side};
use crate::omdb::MovieDetail;
use crate::stats::movie_stats;

#[derive(Debug, Default)]
struct Slot {
    issued: u64,
    movie: Option<MovieDetail>,
}

/// Ticket for a detail request, used to reject superseded responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    side: Side,
    seq: u64,
}

impl SelectionTicket {
    /// Side the request belongs to.
    #[must_use]
    pub const fn side(self) -> Side {
        self.side
    }
}

/// Left and right selections for one comparison widget.
#[derive(Debug, Default)]
pub struct ComparisonSession {
    left: Slot,
    right: Slot,
}

impl ComparisonSession {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn slot(&self, side: Side) -> &Slot {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Start a detail request for `side`. Earlier tickets for that side
    /// become stale.
    pub fn begin_selection(&mut self, side: Side) -> SelectionTicket {
        let slot = self.slot_mut(side);
        slot.issued += 1;
        SelectionTicket {
            side,
            seq: slot.issued,
        }
    }

    /// Store a detail record. Returns `false` (and stores nothing) if a newer
    /// request for the same side has been started.
    pub fn record(&mut self, ticket: SelectionTicket, movie: MovieDetail) -> bool {
        let slot = self.slot_mut(ticket.side);
        if ticket.seq != slot.issued {
            return false;
        }
        slot.movie = Some(movie);
        true
    }

    /// Current selection for `side`.
    #[must_use]
    pub fn selection(&self, side: Side) -> Option<&MovieDetail> {
        self.slot(side).movie.as_ref()
    }

    /// Whether both sides hold a selection.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.left.movie.is_some() && self.right.movie.is_some()
    }

    /// Row outcomes, once both sides are selected.
    #[must_use]
    pub fn comparison(&self) -> Option<Vec<RowOutcome>> {
        let left = self.left.movie.as_ref()?;
        let right = self.right.movie.as_ref()?;
        Some(compare_stats(&movie_stats(left), &movie_stats(right)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, metascore: &str) -> MovieDetail {
        MovieDetail {
            title: title.into(),
            metascore: metascore.into(),
            ..MovieDetail::default()
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = ComparisonSession::new();
        assert!(session.selection(Side::Left).is_none());
        assert!(!session.is_complete());
        assert!(session.comparison().is_none());
    }

    #[test]
    fn test_record_and_complete() {
        let mut session = ComparisonSession::new();
        let left = session.begin_selection(Side::Left);
        assert!(session.record(left, movie("Up", "88")));
        assert!(!session.is_complete());

        let right = session.begin_selection(Side::Right);
        assert_eq!(right.side(), Side::Right);
        assert!(session.record(right, movie("Cars", "73")));
        assert!(session.is_complete());
        assert_eq!(session.selection(Side::Left).unwrap().title, "Up");
    }

    #[test]
    fn test_superseded_ticket_is_rejected() {
        let mut session = ComparisonSession::new();
        let first = session.begin_selection(Side::Left);
        let second = session.begin_selection(Side::Left);

        assert!(session.record(second, movie("Newer", "1")));
        assert!(!session.record(first, movie("Older", "1")));
        assert_eq!(session.selection(Side::Left).unwrap().title, "Newer");
    }

    #[test]
    fn test_tickets_are_per_side() {
        let mut session = ComparisonSession::new();
        let left = session.begin_selection(Side::Left);
        session.begin_selection(Side::Right);
        assert!(session.record(left, movie("Left", "1")));
    }

    #[test]
    fn test_comparison_rows() {
        let mut session = ComparisonSession::new();
        let l = session.begin_selection(Side::Left);
        session.record(l, movie("Up", "88"));
        let r = session.begin_selection(Side::Right);
        session.record(r, movie("Cars", "73"));

        let outcomes = session.comparison().unwrap();
        assert_eq!(outcomes.len(), 5);
        // Awards: both 0, tie marks right
        assert_eq!(outcomes[0], RowOutcome::Loser(Side::Right));
        // Box office missing on both sides
        assert_eq!(outcomes[1], RowOutcome::Undecided);
        // Metascore 88 vs 73
        assert_eq!(outcomes[2], RowOutcome::Loser(Side::Right));
    }
}
