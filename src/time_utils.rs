// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

/// Text format of the `date` column.
pub const COMPLETION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S+00:00";

/// Format a UTC timestamp for the `date` column.
pub fn format_completion_date(date: DateTime<Utc>) -> String {
    date.format(COMPLETION_DATE_FORMAT).to_string()
}

/// Parse a `date` column value.
pub fn parse_completion_date(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, COMPLETION_DATE_FORMAT).map(|naive| naive.and_utc())
}

/// Default activity name from the hour the run was recorded.
pub fn run_name_for(time: DateTime<Utc>) -> &'static str {
    match time.hour() {
        12..=18 => "Afternoon Run",
        19.. => "Night Run",
        _ => "Morning Run",
    }
}
