//! Candle time values and their ordering.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Time of a candle as it came out of normalization.
///
/// Serializes untagged: date literals and unrecognized text as strings,
/// epoch seconds as a number. That is the shape charting widgets accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CandleTime {
    /// Whole-day period in `YYYY-MM-DD` form.
    DateLiteral(String),
    /// Seconds since 1970-01-01T00:00:00 UTC.
    EpochSeconds(i64),
    /// Text no normalization rule recognized, kept verbatim.
    Unrecognized(String),
}

impl CandleTime {
    /// Returns true if `s` is exactly four digits, dash, two digits, dash, two digits.
    pub fn is_date_literal(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
    }

    /// Numeric sort key. Only epoch values carry one; everything else counts as 0.
    pub fn numeric_key(&self) -> i64 {
        match self {
            CandleTime::EpochSeconds(secs) => *secs,
            _ => 0,
        }
    }

    pub fn as_date_literal(&self) -> Option<&str> {
        match self {
            CandleTime::DateLiteral(date) => Some(date),
            _ => None,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, CandleTime::Unrecognized(_))
    }
}

impl fmt::Display for CandleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandleTime::DateLiteral(date) => f.write_str(date),
            CandleTime::EpochSeconds(secs) => write!(f, "{secs}"),
            CandleTime::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Three-way comparison used to order parsed candles.
///
/// Two date literals compare lexicographically, which is chronological for
/// the fixed `YYYY-MM-DD` width. Any other pair compares by numeric key.
/// When numeric keys tie and exactly one side is a date literal, the
/// non-date side sorts first so the relation stays a total order.
pub fn compare_times(a: &CandleTime, b: &CandleTime) -> Ordering {
    if let (Some(da), Some(db)) = (a.as_date_literal(), b.as_date_literal()) {
        return da.cmp(db);
    }
    a.numeric_key()
        .cmp(&b.numeric_key())
        .then_with(|| a.as_date_literal().cmp(&b.as_date_literal()))
}
