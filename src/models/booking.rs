// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bookings listed on the profile view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum BookingStatus {
    Confirmed,
    /// Submitted online; the provider still has to call back.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BookingSummary {
    pub id: u32,
    pub service_id: u32,
    pub service_name: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub status: BookingStatus,
}

/// Booking history shown for the demo account after a local sign-in.
pub fn sample_bookings() -> Vec<BookingSummary> {
    let booking = |id, service_name: &str, (y, m, d), status| BookingSummary {
        id,
        service_id: id,
        service_name: service_name.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        status,
    };

    vec![
        booking(
            1,
            "Winter Coat Fitting for Dogs",
            (2024, 11, 15),
            BookingStatus::Confirmed,
        ),
        booking(
            2,
            "Winter Grooming & Paw Treatment",
            (2024, 11, 20),
            BookingStatus::Pending,
        ),
    ]
}
