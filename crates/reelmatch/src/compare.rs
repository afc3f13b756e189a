//! Positional comparison of two movies' statistic rows.

use crate::stats::Stat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Parse a lowercase tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Lowercase tag (`left` / `right`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of comparing one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// This side has the lower value. Ties mark the right side.
    Loser(Side),
    /// At least one side has no value; neither is marked.
    Undecided,
}

impl RowOutcome {
    /// Whether `side` should get the losing style.
    #[must_use]
    pub fn loses(self, side: Side) -> bool {
        self == Self::Loser(side)
    }
}

/// Compare one row.
#[must_use]
pub fn compare_values(left: Option<f64>, right: Option<f64>) -> RowOutcome {
    match (left, right) {
        (Some(l), Some(r)) if r > l => RowOutcome::Loser(Side::Left),
        (Some(_), Some(_)) => RowOutcome::Loser(Side::Right),
        _ => RowOutcome::Undecided,
    }
}

/// Compare rows pairwise by position. Rows without a counterpart are
/// ignored.
#[must_use]
pub fn compare_rows(left: &[Option<f64>], right: &[Option<f64>]) -> Vec<RowOutcome> {
    left.iter()
        .zip(right)
        .map(|(&l, &r)| compare_values(l, r))
        .collect()
}

/// Compare two movies' summary rows.
#[must_use]
pub fn compare_stats(left: &[Stat], right: &[Stat]) -> Vec<RowOutcome> {
    let values = |stats: &[Stat]| stats.iter().map(|s| s.value).collect::<Vec<_>>();
    compare_rows(&values(left), &values(right))
}
