//! Regex-based occasion extraction
//!
//! Recognises sentences of the form "<name>'s <keyword> ... <date>":
//!
//! ```
//! use chrono::NaiveDate;
//! use vibekeeper_core::PatternExtractor;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
//! let found = PatternExtractor::default()
//!     .extract_sync("Bahar's birthday is 04/04", today)
//!     .unwrap();
//!
//! assert_eq!(found.person, "Bahar");
//! assert_eq!(found.occasion_type, "birthday");
//! assert_eq!(found.occasion_date, NaiveDate::from_ymd_opt(2025, 4, 4).unwrap());
//! ```

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use vibekeeper_domain::constants::{
    DEFAULT_DATE_OFFSET_DAYS, EXTRACTED_NOTES_PREFIX, OCCASION_KEYWORDS, PATTERN_CONFIDENCE,
    PATTERN_DEFAULTED_DATE_CONFIDENCE,
};
use vibekeeper_domain::{month_from_name, ExtractedOccasion, Result};

use super::ports::OccasionExtractor;

static PERSON_OCCASION: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"(\w+)'?s?\s+({})", OCCASION_KEYWORDS.join("|"));
    Regex::new(&pattern).expect("PERSON_OCCASION regex should compile - this is a bug")
});

/// 04/04/2025 (month first)
static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b")
        .expect("MONTH_DAY_YEAR regex should compile - this is a bug")
});

/// 04/04
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})\b").expect("MONTH_DAY regex should compile - this is a bug")
});

/// 2025-04-04
static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b")
        .expect("ISO_DATE regex should compile - this is a bug")
});

/// June 1st, 2026 / Dec 15
static MONTH_NAME_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?\b,?(?:\s+(\d{4})\b)?")
        .expect("MONTH_NAME_DAY regex should compile - this is a bug")
});

/// Keyword and date heuristics; no network, never fails
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    default_date_offset_days: i64,
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_OFFSET_DAYS)
    }
}

impl PatternExtractor {
    /// `default_date_offset_days` is used when the sentence has no date.
    pub fn new(default_date_offset_days: i64) -> Self {
        Self { default_date_offset_days }
    }

    /// Synchronous form of [`OccasionExtractor::extract`].
    pub fn extract_sync(&self, text: &str, today: NaiveDate) -> Option<ExtractedOccasion> {
        let lowered = text.to_lowercase();
        let caps = PERSON_OCCASION.captures(&lowered)?;
        let person = capitalize(&caps[1]);
        let occasion_type = caps[2].to_string();

        let (occasion_date, confidence_score) = match find_date(text, today) {
            Some(date) => (date, PATTERN_CONFIDENCE),
            None => (self.default_date(today), PATTERN_DEFAULTED_DATE_CONFIDENCE),
        };

        Some(ExtractedOccasion {
            person,
            occasion_type,
            occasion_date,
            person_relationship: None,
            notes: Some(format!("{EXTRACTED_NOTES_PREFIX}{text}")),
            confidence_score,
            raw_input: text.to_string(),
        })
    }

    fn default_date(&self, today: NaiveDate) -> NaiveDate {
        today.checked_add_signed(Duration::days(self.default_date_offset_days)).unwrap_or(today)
    }
}

#[async_trait]
impl OccasionExtractor for PatternExtractor {
    fn name(&self) -> &str {
        "pattern"
    }

    async fn extract(&self, text: &str, today: NaiveDate) -> Result<Option<ExtractedOccasion>> {
        Ok(self.extract_sync(text, today))
    }
}

/// First real calendar date found, trying each pattern in priority order.
fn find_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let year = today.year();

    MONTH_DAY_YEAR
        .captures(text)
        .and_then(|caps| ymd(number(&caps, 3)?, number(&caps, 1)?, number(&caps, 2)?))
        .or_else(|| {
            MONTH_DAY
                .captures(text)
                .and_then(|caps| ymd(year, number(&caps, 1)?, number(&caps, 2)?))
        })
        .or_else(|| {
            ISO_DATE
                .captures(text)
                .and_then(|caps| ymd(number(&caps, 1)?, number(&caps, 2)?, number(&caps, 3)?))
        })
        .or_else(|| {
            MONTH_NAME_DAY.captures_iter(text).find_map(|caps| {
                let month = month_from_name(&caps[1])?;
                let year = match caps.get(3) {
                    Some(found) => found.as_str().parse().ok()?,
                    None => year,
                };
                ymd(year, month, number(&caps, 2)?)
            })
        })
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn extract(text: &str) -> Option<ExtractedOccasion> {
        PatternExtractor::default().extract_sync(text, today())
    }

    #[test]
    fn possessive_birthday_with_month_day() {
        let found = extract("Bahar's birthday is 04/04").unwrap();
        assert_eq!(found.person, "Bahar");
        assert_eq!(found.occasion_type, "birthday");
        assert_eq!(found.occasion_date, ymd(2025, 4, 4));
        assert_eq!(found.confidence_score, PATTERN_CONFIDENCE);
        assert_eq!(found.notes.as_deref(), Some("Extracted from: Bahar's birthday is 04/04"));
        assert_eq!(found.person_relationship, None);
    }

    #[test]
    fn full_numeric_date_is_month_first() {
        let found = extract("JOHN's wedding on 3/4/2026").unwrap();
        assert_eq!(found.person, "John");
        assert_eq!(found.occasion_type, "wedding");
        assert_eq!(found.occasion_date, ymd(2026, 3, 4));
    }

    #[test]
    fn iso_date() {
        let found = extract("Sam graduation 2025-06-15").unwrap();
        assert_eq!(found.person, "Sam");
        assert_eq!(found.occasion_type, "graduation");
        assert_eq!(found.occasion_date, ymd(2025, 6, 15));
    }

    #[test]
    fn month_name_with_ordinal() {
        let found = extract("Mom's birthday is June 1st").unwrap();
        assert_eq!(found.occasion_date, ymd(2025, 6, 1));

        let found = extract("Dad's anniversary is Dec 15th, 2026").unwrap();
        assert_eq!(found.person, "Dad");
        assert_eq!(found.occasion_date, ymd(2026, 12, 15));
    }

    #[test]
    fn non_month_words_before_numbers_are_skipped() {
        let found = extract("Ana's birthday is in 3 weeks, on March 9").unwrap();
        assert_eq!(found.occasion_date, ymd(2025, 3, 9));
    }

    #[test]
    fn missing_date_defaults_with_lower_confidence() {
        let found = extract("Lily's birthday party").unwrap();
        assert_eq!(found.occasion_date, ymd(2025, 2, 9));
        assert_eq!(found.confidence_score, PATTERN_DEFAULTED_DATE_CONFIDENCE);

        let found = PatternExtractor::new(7).extract_sync("Lily's birthday", today()).unwrap();
        assert_eq!(found.occasion_date, ymd(2025, 1, 17));
    }

    #[test]
    fn impossible_dates_fall_through() {
        let found = extract("Tom's birthday is 02/30").unwrap();
        assert_eq!(found.occasion_date, ymd(2025, 2, 9));
        assert_eq!(found.confidence_score, PATTERN_DEFAULTED_DATE_CONFIDENCE);
    }

    #[test]
    fn no_keyword_means_nothing() {
        assert!(extract("Remember to buy milk on 04/04").is_none());
        assert!(extract("").is_none());
    }

    #[tokio::test]
    async fn trait_object_matches_sync_form() {
        let extractor: &dyn OccasionExtractor = &PatternExtractor::default();
        assert_eq!(extractor.name(), "pattern");
        let found = extractor.extract("Kai's birthday is 7/9", today()).await.unwrap();
        assert_eq!(found.unwrap().occasion_date, ymd(2025, 7, 9));
    }
}
