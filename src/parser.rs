// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Free-text extraction for the informational echo fields: an embedded URL
//! and a coarse timeframe keyword resolved to a concrete date.

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"));

/// First `http(s)://` run in the text, if any.
pub fn extract_url(text: &str) -> Option<&str> {
    URL_PATTERN.find(text).map(|m| m.as_str())
}

/// Resolve a coarse timeframe keyword to a date.
///
/// Rules: "next week" is the Monday on/after `today + 1..=7` days
/// (`today + (7 - weekday)`), "this weekend" is the coming Saturday
/// (`today + (5 - weekday) mod 7`, so a weekend day maps into the current
/// weekend), "halloween"/"christmas" resolve against the current year and
/// roll to the next year once past. `today` is injected so the rules stay
/// deterministic under test.
pub fn extract_timeframe(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = text.to_lowercase();
    let weekday = today.weekday().num_days_from_monday() as i64;

    if lower.contains("next week") {
        Some(today + Duration::days(7 - weekday))
    } else if lower.contains("this weekend") {
        Some(today + Duration::days((5 - weekday).rem_euclid(7)))
    } else if lower.contains("halloween") {
        Some(next_occurrence(today, 10, 31))
    } else if lower.contains("christmas") {
        Some(next_occurrence(today, 12, 25))
    } else {
        None
    }
}

fn next_occurrence(today: NaiveDate, month: u32, day: u32) -> NaiveDate {
    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)
        .expect("fixed month/day is valid");
    if this_year < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day).expect("fixed month/day is valid")
    } else {
        this_year
    }
}
