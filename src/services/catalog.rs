// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Service catalog loading and filtering.

use crate::models::ServiceRecord;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Category option that matches every record.
pub const ALL_CATEGORIES: &str = "All";

/// Read-only catalog loaded once at startup.
#[derive(Debug, Default, Clone)]
pub struct CatalogService {
    records: Vec<ServiceRecord>,
}

impl CatalogService {
    /// Load the catalog from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load the catalog from a JSON array of service records.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let records: Vec<ServiceRecord> =
            serde_json::from_str(json_data).map_err(|e| CatalogError::ParseError(e.to_string()))?;
        Self::from_records(records)
    }

    /// Build a catalog, rejecting duplicate ids.
    pub fn from_records(records: Vec<ServiceRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
        }

        tracing::info!(count = records.len(), "Loaded service catalog");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    pub fn find(&self, id: u32) -> Option<&ServiceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// First `count` records, in catalog order, for the home view.
    pub fn featured(&self, count: usize) -> &[ServiceRecord] {
        &self.records[..count.min(self.records.len())]
    }

    pub fn search(&self, query: Option<&str>, category: Option<&str>) -> Vec<&ServiceRecord> {
        filter(&self.records, query, category)
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.records)
    }
}

/// Filter records by free-text query and category, keeping input order.
///
/// The query is matched case-insensitively against name, description and
/// category; an empty or blank query matches everything. The category must
/// match exactly unless it is absent or [`ALL_CATEGORIES`].
pub fn filter<'a>(
    records: &'a [ServiceRecord],
    query: Option<&str>,
    category: Option<&str>,
) -> Vec<&'a ServiceRecord> {
    let needle = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);
    let category = category.filter(|c| *c != ALL_CATEGORIES);

    records
        .iter()
        .filter(|r| category.map_or(true, |c| r.category == c))
        .filter(|r| {
            needle.as_deref().map_or(true, |n| {
                r.name.to_lowercase().contains(n)
                    || r.description.to_lowercase().contains(n)
                    || r.category.to_lowercase().contains(n)
            })
        })
        .collect()
}

/// Categories in order of first appearance, with [`ALL_CATEGORIES`] first.
pub fn distinct_categories(records: &[ServiceRecord]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for record in records {
        if !categories.iter().skip(1).any(|c| *c == record.category) {
            categories.push(record.category.clone());
        }
    }
    categories
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse catalog JSON: {0}")]
    ParseError(String),

    #[error("Duplicate service id: {0}")]
    DuplicateId(u32),
}
