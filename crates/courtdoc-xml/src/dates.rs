//! Dates and their labels from free-text date blocks
//!
//! A block such as `Argued January 5, 1990; Decided March 3, 1990.` holds
//! several dates. The block is split after every four-digit year, each
//! fragment is parsed on its own, and the words before the date become its
//! label (`argued`, `decided`).

use chrono::NaiveDate;
use courtdoc_core::LabeledDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Full month names, as searched in lower-cased fragments
static MONTH_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "january|february|march|april|may|june|july|august|september|october|november|december",
    )
    .expect("Invalid month name regex")
});

static FOUR_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new("[0-9]{4}").expect("Invalid year regex"));

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("Invalid digit regex"));

static FOOTNOTE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[fn.?\]").expect("Invalid footnote regex"));

static NON_ALPHA: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^A-Za-z ]").expect("Invalid non-alpha regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid space regex"));

/// Month word: full name or common abbreviation, optional trailing dot
static MONTH_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\b\.?",
    )
    .expect("Invalid month word regex")
});

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("Invalid numeric date regex")
});

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("Invalid ISO date regex")
});

/// Day written right after the month: `January 5`, `Jan. 5th,`
static DAY_AFTER_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2})(?:st|nd|rd|th)?\b").expect("Invalid day-after regex")
});

/// Day written right before the month: `5 January`, `5th day of January`
static DAY_BEFORE_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(?:day\s+of\s+)?$")
        .expect("Invalid day-before regex")
});

/// Ordinal day phrase, kept out of labels: `the 5th day of`
static DAY_OF_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:the\s+)?\d{1,2}(?:st|nd|rd|th)?\s+day\s+of\b")
        .expect("Invalid day-of phrase regex")
});

static BARE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("Invalid bare year regex"));

/// Extract one group of labeled dates per raw date string
#[must_use]
pub fn parse_dates<S: AsRef<str>>(raw_dates: &[S]) -> Vec<Vec<LabeledDate>> {
    raw_dates
        .iter()
        .map(|raw| parse_date_block(raw.as_ref()))
        .collect()
}

/// Labeled dates found in one date block, in order
#[must_use]
pub fn parse_date_block(raw: &str) -> Vec<LabeledDate> {
    split_after_years(raw)
        .into_iter()
        .filter_map(parse_fragment)
        .collect()
}

/// Split after each run of four digits, dropping the character that follows
/// the run.
///
/// Any position preceded by four ASCII digits is a split point, so a
/// five-digit run splits once after its fourth digit.
#[must_use]
pub fn split_after_years(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut digits = 0usize;
    for (idx, c) in raw.char_indices() {
        if digits >= 4 {
            parts.push(&raw[start..idx]);
            start = idx + c.len_utf8();
        }
        digits = if c.is_ascii_digit() { digits + 1 } else { 0 };
    }
    parts.push(&raw[start..]);
    parts
}

fn parse_fragment(fragment: &str) -> Option<LabeledDate> {
    let lower = fragment.to_lowercase();
    let has_month = MONTH_NAME.is_match(&lower);
    if !has_month && !FOUR_DIGITS.is_match(fragment) {
        return None;
    }

    let cleaned = fragment.replace(['(', ')'], "");
    let date = parse_date(&cleaned)?;

    let lower = cleaned.to_lowercase();
    let prefix = if let Some(phrase) = DAY_OF_PHRASE.find(&lower) {
        Some(&lower[..phrase.start()])
    } else if has_month {
        MONTH_NAME.split(&lower).next()
    } else {
        DIGIT_RUN.split(&lower).next()
    }
    .unwrap_or_default();
    Some(LabeledDate::new(clean_label(prefix), date))
}

/// Footnote markers and non-letters removed, whitespace collapsed
fn clean_label(prefix: &str) -> Option<String> {
    let text = FOOTNOTE_MARKER.replace_all(prefix.trim(), "");
    let text = NON_ALPHA.replace_all(&text, "");
    let text = WHITESPACE.replace_all(text.trim(), " ");
    (!text.is_empty()).then(|| text.into_owned())
}

/// Find a calendar date anywhere in `text`.
///
/// `M/D/YYYY` and `YYYY-MM-DD` are taken as written. Otherwise the first
/// month word fixes the month; the day is a one or two digit number
/// (ordinal suffix allowed) directly after the month, or directly before
/// it as in `5 January` and `the 5th day of January`, and defaults to the
/// first. The year is the first four-digit number after the month, or
/// before it when none follows. Without a month word a bare year means
/// January 1. Impossible dates such as February 30 are rejected.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Some(c) = NUMERIC_DATE.captures(text) {
        return ymd(&c[3], &c[1], &c[2]);
    }
    if let Some(c) = ISO_DATE.captures(text) {
        return ymd(&c[1], &c[2], &c[3]);
    }
    match MONTH_WORD.captures(text) {
        Some(c) => {
            let (month, whole) = (c.get(1)?, c.get(0)?);
            date_around_month(&text[..whole.start()], month.as_str(), &text[whole.end()..])
        }
        None => BARE_YEAR
            .captures(text)
            .and_then(|c| ymd(&c[1], "1", "1")),
    }
}

fn date_around_month<'t>(
    before: &'t str,
    month_name: &str,
    after: &'t str,
) -> Option<NaiveDate> {
    let year = BARE_YEAR
        .captures(after)
        .or_else(|| BARE_YEAR.captures_iter(before).last())?;
    let day = DAY_AFTER_MONTH
        .captures(after)
        .or_else(|| DAY_BEFORE_MONTH.captures(before))
        .map_or("1", |c| c.get(1).map_or("1", |m| m.as_str()));
    month_date(&year[1], month_name, day)
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn month_date(year: &str, month_name: &str, day: &str) -> Option<NaiveDate> {
    let month = month_number(month_name)?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}

/// 1-based month for a full or abbreviated English month name
#[must_use]
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim_end_matches('.').to_lowercase();
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_argued_date() {
        let groups = parse_dates(&["Argued January 5, 1990"]);
        assert_eq!(
            groups,
            vec![vec![LabeledDate::new(Some("argued".to_string()), date(1990, 1, 5))]]
        );
    }

    #[test]
    fn test_multiple_dates_in_one_block() {
        let dates = parse_date_block("Argued January 5, 1990; Decided March 3, 1990.");
        assert_eq!(
            dates,
            vec![
                LabeledDate::new(Some("argued".to_string()), date(1990, 1, 5)),
                LabeledDate::new(Some("decided".to_string()), date(1990, 3, 3)),
            ]
        );
    }

    #[test]
    fn test_footnotes_and_punctuation_dropped_from_label() {
        let dates = parse_date_block("Submitted on Briefs[fn1] (October 2, 1987)");
        assert_eq!(
            dates,
            vec![LabeledDate::new(
                Some("submitted on briefs".to_string()),
                date(1987, 10, 2)
            )]
        );
    }

    #[test]
    fn test_numeric_date_label_before_digits() {
        let dates = parse_date_block("Filed: 3/14/2016");
        assert_eq!(
            dates,
            vec![LabeledDate::new(Some("filed".to_string()), date(2016, 3, 14))]
        );
    }

    #[test]
    fn test_unlabeled_date() {
        let dates = parse_date_block("June 30, 1975");
        assert_eq!(dates, vec![LabeledDate::new(None, date(1975, 6, 30))]);
    }

    #[test]
    fn test_other_shapes() {
        assert_eq!(parse_date("5 January 1990"), Some(date(1990, 1, 5)));
        assert_eq!(parse_date("Sept. 12, 2001"), Some(date(2001, 9, 12)));
        assert_eq!(parse_date("Term March 1850"), Some(date(1850, 3, 1)));
        assert_eq!(parse_date("1990-01-05"), Some(date(1990, 1, 5)));
        assert_eq!(parse_date("Term of 1850"), Some(date(1850, 1, 1)));
    }

    #[test]
    fn test_month_without_adjacent_day() {
        let dates = parse_date_block("April Term, 1854");
        assert_eq!(dates, vec![LabeledDate::new(None, date(1854, 4, 1))]);
        assert_eq!(parse_date("January Term, A.D. 1861"), Some(date(1861, 1, 1)));
    }

    #[test]
    fn test_ordinal_day_of_month() {
        let dates = parse_date_block("Decided the 5th day of January, 1990");
        assert_eq!(
            dates,
            vec![LabeledDate::new(Some("decided".to_string()), date(1990, 1, 5))]
        );
        assert_eq!(parse_date("21st day of Nov. 1872"), Some(date(1872, 11, 21)));
        assert_eq!(parse_date("March 3rd, 1990"), Some(date(1990, 3, 3)));
    }

    #[test]
    fn test_invalid_dates_discarded() {
        assert_eq!(parse_date("February 30, 1990"), None);
        assert!(parse_date_block("Decided February 30, 1990").is_empty());
        assert!(parse_date_block("no date here").is_empty());
    }

    #[test]
    fn test_split_after_years() {
        assert_eq!(
            split_after_years("Argued May 1, 1990, decided June 2, 1991"),
            vec!["Argued May 1, 1990", " decided June 2, 1991"]
        );
        assert_eq!(split_after_years("12345"), vec!["1234", ""]);
        assert_eq!(split_after_years("no years"), vec!["no years"]);
    }

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("Sept."), Some(9));
        assert_eq!(month_number("DECEMBER"), Some(12));
        assert_eq!(month_number("Ma"), None);
    }

    proptest! {
        #[test]
        fn prop_split_loses_at_most_one_char_per_year(s in "[a-z0-9 ,]{0,60}") {
            let parts = split_after_years(&s);
            let kept: usize = parts.iter().map(|p| p.len()).sum();
            prop_assert_eq!(s.len() - kept, parts.len() - 1);
        }

        #[test]
        fn prop_one_group_per_input(blocks in proptest::collection::vec("[A-Za-z0-9 ,]{0,30}", 0..5)) {
            prop_assert_eq!(parse_dates(blocks.as_slice()).len(), blocks.len());
        }
    }
}
