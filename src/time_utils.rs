// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date formatting.

use chrono::{Datelike, NaiveDate, Utc};

/// Format a date as the "Member since" label, e.g. `October 2026`.
pub fn month_year(date: NaiveDate) -> String {
    format!("{} {}", date.format("%B"), date.year())
}

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
