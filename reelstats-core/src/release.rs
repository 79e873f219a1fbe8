//! Release-year and decade derivation.

use chrono::{Datelike, NaiveDate};

/// Parse the release year out of a TMDb release date.
///
/// Accepts `YYYY-MM-DD` and a bare four-digit year. Anything else (empty
/// string, partial dates, garbage) yields `None`.
pub fn release_year(date: &str) -> Option<i32> {
    let s = date.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.year());
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok();
    }
    None
}

/// Decade bucket label for a year: 1987 -> `"1980s"`.
pub fn decade_label(year: i32) -> String {
    format!("{}s", year.div_euclid(10) * 10)
}

#[cfg(test)]
#[path = "tests/release_tests.rs"]
mod tests;
