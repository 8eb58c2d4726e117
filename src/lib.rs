// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! WarmPaws: winter pet-care services catalog and booking
//!
//! This crate hosts the application logic behind the WarmPaws front-end:
//! the visitor session, the route guard for booking views, catalog search,
//! and sign-in through local forms or Google.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{CatalogService, HomeContent, IdentityProvider, SessionStore};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub catalog: CatalogService,
    pub content: HomeContent,
    pub sessions: SessionStore,
    pub identity: Arc<dyn IdentityProvider>,
}
