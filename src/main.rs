// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! WarmPaws API Server
//!
//! Serves the catalog, booking and account views to the WarmPaws front-end.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warmpaws::{
    config::Config,
    db::FileStore,
    services::{CatalogService, GoogleIdentityProvider, HomeContent, SessionStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting WarmPaws API");

    tracing::info!(path = %config.catalog_path.display(), "Loading service catalog");
    let catalog = CatalogService::load_from_file(&config.catalog_path)?;
    tracing::info!(count = catalog.records().len(), "Service catalog loaded");

    let content = HomeContent::load_from_files(&config.winter_tips_path, &config.experts_path)?;

    let store = Arc::new(FileStore::new(&config.session_store_path));
    tracing::info!(path = %store.path().display(), "Session storage opened");
    let sessions = SessionStore::initialize(store);

    let identity = Arc::new(GoogleIdentityProvider::new(&config)?);

    let state = Arc::new(AppState {
        config: config.clone(),
        catalog,
        content,
        sessions,
        identity,
    });

    let app = warmpaws::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("warmpaws=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
