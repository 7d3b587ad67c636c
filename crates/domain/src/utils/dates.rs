//! Calendar date helpers
//!
//! Extractors (regex and LLM) hand back dates in whatever shape the user or
//! model wrote them. Everything funnels through [`normalize_date`] so the
//! rest of the system only ever sees a [`NaiveDate`].

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches ordinal suffixes: "1st", "22nd", "3rd", "15th"
static ORDINAL_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b")
        .expect("ORDINAL_SUFFIX regex should compile - this is a bug")
});

/// Matches a bare month/day pair after separator normalisation: "04-04"
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}-\d{1,2}$")
        .expect("MONTH_DAY regex should compile - this is a bug")
});

/// Matches a month name followed by a day with no year: "December 15"
static NAMED_MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]+ \d{1,2}$")
        .expect("NAMED_MONTH_DAY regex should compile - this is a bug")
});

const NUMERIC_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%m-%d-%Y"];
const NAMED_FORMATS: [&str; 2] = ["%B %d %Y", "%b %d %Y"];

const MONTHS: [(&str, &str); 12] = [
    ("january", "jan"),
    ("february", "feb"),
    ("march", "mar"),
    ("april", "apr"),
    ("may", "may"),
    ("june", "jun"),
    ("july", "jul"),
    ("august", "aug"),
    ("september", "sep"),
    ("october", "oct"),
    ("november", "nov"),
    ("december", "dec"),
];

/// Today's date in the server's local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Month number (1-12) for an English month name or its abbreviation.
///
/// "Sept" is accepted alongside "Sep".
pub fn month_from_name(name: &str) -> Option<u32> {
    let name = name.trim().trim_end_matches('.').to_lowercase();
    if name == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|(full, short)| name == *full || name == *short)
        .and_then(|index| u32::try_from(index + 1).ok())
}

/// Parse a loosely formatted date string.
///
/// Accepts ISO dates, slash/dot/dash separated numeric dates (day-first
/// before month-first when both are valid), a bare month/day pair, and month
/// names with optional ordinal suffixes. A missing year means `today`'s year.
/// Returns `None` when nothing yields a real calendar date.
pub fn normalize_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    let mut candidate = trimmed.replace(['/', '.'], "-");
    if MONTH_DAY.is_match(&candidate) {
        candidate = format!("{}-{}", today.year(), candidate);
    }

    let candidate = ORDINAL_SUFFIX.replace_all(&candidate, "$1").replace(',', " ");
    let mut candidate = candidate.split_whitespace().collect::<Vec<_>>().join(" ");
    if NAMED_MONTH_DAY.is_match(&candidate) {
        candidate = format!("{} {}", candidate, today.year());
    }

    NUMERIC_FORMATS
        .iter()
        .chain(NAMED_FORMATS.iter())
        .find_map(|format| NaiveDate::parse_from_str(&candidate, format).ok())
}
