//! Numeric extraction from OMDb's display strings.
//!
//! OMDb returns every statistic as formatted text (`"$1,234,567"`, `"8.6"`,
//! `"Won 3 Oscars. 12 wins & 5 nominations."`). Each summary row keeps both
//! the original text and the number pulled out of it.

use crate::omdb::MovieDetail;
use serde::{Deserialize, Serialize};

/// Parse a formatted amount by dropping everything but digits, `.` and `-`.
///
/// `"$1,234,567"` → `1234567`. Text with no digits left (such as `"N/A"`)
/// has no value.
#[must_use]
pub fn parse_amount(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a plain decimal such as `"8.6"`.
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Leading integer of a word, with an optional sign: `"12,"` → 12,
/// `"Oscars."` → none.
///
/// Digit runs of any length are accepted; values past 2^53 lose precision
/// rather than being dropped.
#[must_use]
pub fn leading_integer(word: &str) -> Option<f64> {
    let word = word.trim_start();
    let (sign, rest) = match word.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, word.strip_prefix('+').unwrap_or(word)),
    };
    let end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(rest.len(), |(i, _)| i);
    rest[..end]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| sign * n)
}

/// Sum of the integers that start each whitespace-separated word.
///
/// `"Won 3 Oscars. Another 12 wins & 5 nominations."` → 20. Text without
/// numbers sums to 0.
#[must_use]
pub fn sum_embedded_integers(text: &str) -> f64 {
    text.split_whitespace().filter_map(leading_integer).sum()
}

/// Statistic rows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Awards,
    BoxOffice,
    Metascore,
    ImdbRating,
    ImdbVotes,
}

impl StatKind {
    /// All rows in display order.
    pub const ALL: [Self; 5] = [
        Self::Awards,
        Self::BoxOffice,
        Self::Metascore,
        Self::ImdbRating,
        Self::ImdbVotes,
    ];

    /// Row caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Awards => "Awards",
            Self::BoxOffice => "Box Office",
            Self::Metascore => "Metascore",
            Self::ImdbRating => "IMDB Rating",
            Self::ImdbVotes => "IMDB Votes",
        }
    }

    /// Source text for this row.
    #[must_use]
    pub fn display(self, detail: &MovieDetail) -> &str {
        match self {
            Self::Awards => &detail.awards,
            Self::BoxOffice => &detail.box_office,
            Self::Metascore => &detail.metascore,
            Self::ImdbRating => &detail.imdb_rating,
            Self::ImdbVotes => &detail.imdb_votes,
        }
    }

    /// Numeric value of `text` for this row.
    #[must_use]
    pub fn parse(self, text: &str) -> Option<f64> {
        match self {
            Self::Awards => Some(sum_embedded_integers(text)).filter(|n| n.is_finite()),
            Self::BoxOffice | Self::ImdbVotes => parse_amount(text),
            Self::Metascore => leading_integer(text),
            Self::ImdbRating => parse_decimal(text),
        }
    }
}

/// One summary row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    /// Which row
    pub kind: StatKind,
    /// Text as shown
    pub display: String,
    /// Extracted number
    pub value: Option<f64>,
}

/// All summary rows for a movie, in display order.
#[must_use]
pub fn movie_stats(detail: &MovieDetail) -> Vec<Stat> {
    StatKind::ALL
        .iter()
        .map(|&kind| {
            let display = kind.display(detail);
            Stat {
                kind,
                display: display.to_string(),
                value: kind.parse(display),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_currency() {
        assert_eq!(parse_amount("$1,234,567"), Some(1_234_567.0));
        assert_eq!(parse_amount("$858,373,000"), Some(858_373_000.0));
        assert_eq!(parse_amount("2,079,140"), Some(2_079_140.0));
    }

    #[test]
    fn test_parse_amount_without_digits() {
        assert_eq!(parse_amount("N/A"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("$"), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("8.6"), Some(8.6));
        assert_eq!(parse_decimal(" 7 "), Some(7.0));
        assert_eq!(parse_decimal("N/A"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("3"), Some(3.0));
        assert_eq!(leading_integer("12,"), Some(12.0));
        assert_eq!(leading_integer("147nominations"), Some(147.0));
        assert_eq!(leading_integer("-4"), Some(-4.0));
        assert_eq!(leading_integer("Oscars."), None);
        assert_eq!(leading_integer("&"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn test_sum_embedded_integers() {
        assert_eq!(
            sum_embedded_integers("Won 3 Oscars. Another 12 wins & 5 nominations."),
            20.0
        );
        assert_eq!(sum_embedded_integers("N/A"), 0.0);
        assert_eq!(sum_embedded_integers(""), 0.0);
    }

    #[test]
    fn test_huge_award_counts_do_not_overflow() {
        let text = "Won 9000000000000000000 Oscars. Another 9000000000000000000 wins";
        assert_eq!(sum_embedded_integers(text), 1.8e19);
        assert_eq!(StatKind::Awards.parse(text), Some(1.8e19));

        assert_eq!(leading_integer("100000000000000000000"), Some(1e20));
        assert_eq!(
            sum_embedded_integers("Won 100000000000000000000 awards and 3 wins"),
            1e20 + 3.0
        );
    }

    #[test]
    fn test_movie_stats_order_and_values() {
        let detail = MovieDetail {
            awards: "Won 4 Oscars. 42 wins & 51 nominations total".into(),
            box_office: "$172,076,928".into(),
            metascore: "73".into(),
            imdb_rating: "8.7".into(),
            imdb_votes: "2,079,140".into(),
            ..MovieDetail::default()
        };
        let stats = movie_stats(&detail);
        let kinds: Vec<StatKind> = stats.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, StatKind::ALL);

        let values: Vec<Option<f64>> = stats.iter().map(|s| s.value).collect();
        assert_eq!(
            values,
            vec![
                Some(97.0),
                Some(172_076_928.0),
                Some(73.0),
                Some(8.7),
                Some(2_079_140.0)
            ]
        );
        assert_eq!(stats[1].display, "$172,076,928");
    }

    #[test]
    fn test_movie_stats_missing_values() {
        let stats = movie_stats(&MovieDetail {
            metascore: "N/A".into(),
            box_office: "N/A".into(),
            ..MovieDetail::default()
        });
        assert_eq!(stats[0].value, Some(0.0));
        assert_eq!(stats[1].value, None);
        assert_eq!(stats[2].value, None);
        assert_eq!(stats[3].value, None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<&str> = StatKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            ["Awards", "Box Office", "Metascore", "IMDB Rating", "IMDB Votes"]
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod property {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_formatted_amount_roundtrips(n in 0u64..10_000_000_000) {
                let mut grouped = String::new();
                let digits = n.to_string();
                for (i, c) in digits.chars().enumerate() {
                    if i > 0 && (digits.len() - i) % 3 == 0 {
                        grouped.push(',');
                    }
                    grouped.push(c);
                }
                prop_assert_eq!(parse_amount(&format!("${grouped}")), Some(n as f64));
            }

            #[test]
            fn prop_sum_matches_inserted_numbers(
                parts in prop::collection::vec((0i64..1000, "[a-zA-Z.&]{1,10}"), 0..8),
            ) {
                let text: Vec<String> = parts.iter().map(|(n, w)| format!("{n} {w}")).collect();
                let expected: f64 = parts.iter().map(|(n, _)| *n as f64).sum();
                prop_assert_eq!(sum_embedded_integers(&text.join(" ")), expected);
            }
        }
    }
}
