// src/services/keys.rs

//! Date and version keys extracted from free-form artifact text.
//!
//! These are heuristics over file names and baseline strings, not calendar
//! parsing: out-of-range months and days pass through unchanged.

use std::sync::LazyLock;

use regex::Regex;

/// `[year, month, day]` proxy for chronological order.
pub type DateKey = [u32; 3];

static FULL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20[0-9]{6}").expect("valid full date pattern"));
static YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20[0-9]{4}").expect("valid year-month pattern"));
static SHORT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{2})([0-9]{2})[_-]?([0-9]{2})([0-9]{2})").expect("valid short date pattern")
});
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid digit run pattern"));

/// Extract a date key from text, trying each pattern in priority order.
///
/// 1. `20YYMMDD` → `[20YY, MM, DD]`
/// 2. `20YYMM` → `[20YY, MM, 0]`
/// 3. `YYMM[_-]DDdd` → `[2000+YY, MM, DDdd]` where the day is the numeric
///    value of the last four digits taken together
/// 4. a run of exactly four digits `YYMM` → `[2000+YY, MM, 0]`
///
/// Only the first matching pattern is used.
pub fn parse_date_key(text: &str) -> Option<DateKey> {
    if let Some(m) = FULL_DATE.find(text) {
        let s = m.as_str();
        return Some([num(&s[0..4]), num(&s[4..6]), num(&s[6..8])]);
    }
    if let Some(m) = YEAR_MONTH.find(text) {
        let s = m.as_str();
        return Some([num(&s[0..4]), num(&s[4..6]), 0]);
    }
    if let Some(caps) = SHORT_DATE.captures(text) {
        let day = format!("{}{}", &caps[3], &caps[4]);
        return Some([2000 + num(&caps[1]), num(&caps[2]), num(&day)]);
    }
    DIGIT_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|run| run.len() == 4)
        .map(|run| [2000 + num(&run[0..2]), num(&run[2..4]), 0])
}

/// Every maximal digit run in `text`, left to right.
pub fn version_key(text: Option<&str>) -> Vec<u64> {
    let Some(text) = text else {
        return Vec::new();
    };
    DIGIT_RUN
        .find_iter(text)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .collect()
}

// Callers only pass ASCII digit slices of at most four characters.
fn num(digits: &str) -> u32 {
    digits.parse().unwrap_or(0)
}
