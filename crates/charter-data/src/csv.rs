//! Delimited text to candle parsing.
//!
//! The parser is lenient on purpose: pasted text is often loosely
//! formatted, so malformed rows are dropped without diagnostics and
//! unparsable prices come through as `NaN`. Absence of usable data is
//! signalled only by `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use charter_core::{compare_times, CandleRecord, CandleTime};

/// Field separators accepted anywhere in a line, freely intermixed.
pub const DELIMITERS: [char; 3] = [',', ';', '\t'];

/// Rows with fewer non-empty fields than this are skipped.
const MIN_ROW_FIELDS: usize = 5;

/// Numeric times above this are milliseconds rather than seconds.
const MILLIS_THRESHOLD: f64 = 1e12;

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Column indices for one candle row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub time: usize,
    pub open: usize,
    pub high: usize,
    pub low: usize,
    pub close: usize,
    pub volume: usize,
}

impl ColumnMap {
    /// Fixed `[time, open, high, low, close, volume]` layout.
    pub const POSITIONAL: ColumnMap = ColumnMap {
        time: 0,
        open: 1,
        high: 2,
        low: 3,
        close: 4,
        volume: 5,
    };

    /// Resolve columns by header name, falling back to the fixed position
    /// for any column the header does not name.
    pub fn from_header(tokens: &[String]) -> Self {
        let find = |name: &str| tokens.iter().position(|t| t == name);
        let fixed = Self::POSITIONAL;
        Self {
            time: find("time").unwrap_or(fixed.time),
            open: find("open").unwrap_or(fixed.open),
            high: find("high").unwrap_or(fixed.high),
            low: find("low").unwrap_or(fixed.low),
            close: find("close").unwrap_or(fixed.close),
            volume: find("volume").unwrap_or(fixed.volume),
        }
    }
}

/// Split a line on any of the given delimiters and trim every field.
///
/// Empty fields are kept; callers decide whether they matter.
pub fn split_fields<'a>(line: &'a str, delimiters: &'a [char]) -> impl Iterator<Item = &'a str> + 'a {
    line.split(delimiters).map(str::trim)
}

/// Treat `line` as a header if it names both a `time` and an `open` column.
pub fn detect_header(line: &str) -> Option<ColumnMap> {
    let tokens: Vec<String> = split_fields(line, &DELIMITERS)
        .map(str::to_lowercase)
        .collect();
    let has_header = tokens.iter().any(|t| t == "time") && tokens.iter().any(|t| t == "open");
    has_header.then(|| ColumnMap::from_header(&tokens))
}

/// Parse delimited text into a time-ordered candle sequence.
///
/// Returns `None` when fewer than two non-empty lines are present or when
/// no row survives parsing.
pub fn parse_candles(text: &str) -> Option<Vec<CandleRecord>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 2 {
        return None;
    }

    let (columns, data) = match detect_header(lines[0]) {
        Some(columns) => (columns, &lines[1..]),
        None => (ColumnMap::POSITIONAL, &lines[..]),
    };

    let mut candles: Vec<CandleRecord> = data
        .iter()
        .filter_map(|line| parse_row(line, &columns))
        .collect();
    log::debug!(
        "Parsed {} candle rows, skipped {}",
        candles.len(),
        data.len() - candles.len()
    );

    // Stable, so equal times keep input order
    candles.sort_by(|a, b| compare_times(&a.time, &b.time));

    if candles.is_empty() {
        None
    } else {
        Some(candles)
    }
}

fn parse_row(line: &str, columns: &ColumnMap) -> Option<CandleRecord> {
    let fields: Vec<&str> = split_fields(line, &DELIMITERS)
        .filter(|f| !f.is_empty())
        .collect();
    if fields.len() < MIN_ROW_FIELDS {
        return None;
    }

    let time = normalize_time(fields.get(columns.time)?)?;
    let price = |idx: usize| fields.get(idx).map_or(f64::NAN, |f| parse_float_prefix(f));
    let volume = fields.get(columns.volume).map_or(0, |f| parse_volume(f));

    Some(CandleRecord::new(
        time,
        price(columns.open),
        price(columns.high),
        price(columns.low),
        price(columns.close),
        volume,
    ))
}

/// Normalize a raw time field.
///
/// - `YYYY-MM-DD` stays a date literal.
/// - Anything chrono can read as a date or date-time becomes epoch seconds
///   (naive values are taken as UTC).
/// - Plain numbers above 1e12 are milliseconds, otherwise seconds.
/// - Everything else is kept verbatim as `Unrecognized`.
///
/// Empty input yields `None` and the row must be rejected.
pub fn normalize_time(raw: &str) -> Option<CandleTime> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    if CandleTime::is_date_literal(t) {
        return Some(CandleTime::DateLiteral(t.to_string()));
    }
    if let Some(millis) = parse_datetime_millis(t) {
        return Some(CandleTime::EpochSeconds(millis.div_euclid(1000)));
    }
    if let Some(n) = t.parse::<f64>().ok().filter(|n| n.is_finite()) {
        let secs = if n > MILLIS_THRESHOLD { n / 1000.0 } else { n };
        return Some(CandleTime::EpochSeconds(secs.floor() as i64));
    }
    Some(CandleTime::Unrecognized(t.to_string()))
}

/// Parse a date or date-time string to epoch milliseconds.
fn parse_datetime_millis(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.timestamp_millis());
        }
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive, fmt) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis());
        }
    }
    None
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parse the longest numeric prefix of `s` as a float, `NaN` if there is none.
///
/// `"12.5abc"` reads as 12.5, `"abc"` as `NaN`.
pub fn parse_float_prefix(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Parse the leading integer of a volume field.
///
/// Missing digits give 0, negatives clamp to 0, overflow saturates.
pub fn parse_volume(s: &str) -> u64 {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = &rest[..count_digits(rest.as_bytes())];
    if digits.is_empty() || negative {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}
