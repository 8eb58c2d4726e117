// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only home page content loaded next to the catalog.

use crate::models::{Expert, WinterTip};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone)]
pub struct HomeContent {
    tips: Vec<WinterTip>,
    experts: Vec<Expert>,
}

impl HomeContent {
    pub fn load_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        tips_path: P,
        experts_path: Q,
    ) -> Result<Self, ContentError> {
        let tips = read_json_array(tips_path.as_ref())?;
        let experts = read_json_array(experts_path.as_ref())?;
        Ok(Self::new(tips, experts))
    }

    pub fn new(tips: Vec<WinterTip>, experts: Vec<Expert>) -> Self {
        tracing::info!(
            tips = tips.len(),
            experts = experts.len(),
            "Loaded home page content"
        );
        Self { tips, experts }
    }

    pub fn tips(&self) -> &[WinterTip] {
        &self.tips
    }

    pub fn experts(&self) -> &[Expert] {
        &self.experts
    }
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ContentError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ContentError::IoError(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| ContentError::ParseError(format!("{}: {e}", path.display())))
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse content JSON: {0}")]
    ParseError(String),
}
