// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pet-care service catalog record.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A bookable service from the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ServiceRecord {
    #[serde(rename = "serviceId")]
    pub id: u32,
    #[serde(rename = "serviceName")]
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub rating: f64,
    pub provider_name: String,
    pub provider_email: String,
    /// Image URL
    pub image: String,
    #[serde(rename = "slotsAvailable")]
    pub available_slots: u32,
}

impl ServiceRecord {
    pub fn is_bookable(&self) -> bool {
        self.available_slots > 0
    }
}
