// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View models for the home, catalog, service and profile pages.

use crate::error::{AppError, Result};
use crate::models::forms::{BookingForm, ProfileUpdateForm};
use crate::models::{
    BookingSummary, Expert, Notice, ServiceRecord, SessionView, UserProfile, WinterTip,
};
use crate::services::accounts;
use crate::services::catalog::ALL_CATEGORIES;
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const FEATURED_COUNT: usize = 6;

/// Views anyone may open.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/services", get(services))
        .route("/my-profile", get(profile).put(update_profile))
}

/// Views behind the route guard. The guard is applied in routes/mod.rs.
pub fn guarded_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/service/{id}", get(service_detail))
        .route("/service/{id}/book", post(book_service))
}

// ─── Home ────────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HomeView {
    pub session: SessionView,
    pub featured: Vec<ServiceRecord>,
    pub categories: Vec<String>,
    pub winter_tips: Vec<WinterTip>,
    pub experts: Vec<Expert>,
}

async fn home(State(state): State<Arc<AppState>>) -> Json<HomeView> {
    Json(HomeView {
        session: SessionView::from(&state.sessions.current()),
        featured: state.catalog.featured(FEATURED_COUNT).to_vec(),
        categories: state.catalog.categories(),
        winter_tips: state.content.tips().to_vec(),
        experts: state.content.experts().to_vec(),
    })
}

// ─── Catalog ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ServicesQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ServicesView {
    pub query: String,
    pub category: String,
    pub categories: Vec<String>,
    pub services: Vec<ServiceRecord>,
    /// Set when nothing matched, for the empty state.
    pub empty_message: Option<String>,
}

async fn services(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ServicesQuery>,
) -> Json<ServicesView> {
    let query = params.q.unwrap_or_default();
    let category = params
        .category
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());

    let services: Vec<ServiceRecord> = state
        .catalog
        .search(Some(&query), Some(&category))
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(query = %query, category = %category, matches = services.len(), "Catalog search");

    let empty_message = services
        .is_empty()
        .then(|| "No services match your search. Try another keyword or category.".to_string());

    Json(ServicesView {
        query,
        category,
        categories: state.catalog.categories(),
        services,
        empty_message,
    })
}

// ─── Service Detail & Booking ────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ServiceDetailView {
    pub service: ServiceRecord,
    pub bookable: bool,
}

async fn service_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<ServiceDetailView>> {
    let service = state
        .catalog
        .find(id)
        .ok_or_else(|| AppError::NotFound("Service Not Found".to_string()))?;

    Ok(Json(ServiceDetailView {
        bookable: service.is_bookable(),
        service: service.clone(),
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BookingResponse {
    pub notice: Notice,
}

async fn book_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(form): Json<BookingForm>,
) -> Result<Json<BookingResponse>> {
    let outcome = accounts::book(&state.sessions, &state.catalog, id, form, today_utc())?;
    state.sessions.notify(outcome.notice.clone());
    Ok(Json(BookingResponse {
        notice: outcome.notice,
    }))
}

// ─── Profile ─────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileView {
    /// True when showing the placeholder guest profile.
    pub is_guest: bool,
    pub profile: UserProfile,
    pub avatar: String,
    /// Always empty for the guest profile.
    pub bookings: Vec<BookingSummary>,
}

impl ProfileView {
    fn new(user: Option<&UserProfile>, bookings: Vec<BookingSummary>) -> Self {
        let (is_guest, profile, bookings) = match user {
            Some(user) => (false, user.clone(), bookings),
            None => (true, UserProfile::guest(), Vec::new()),
        };
        Self {
            is_guest,
            avatar: profile.display_avatar(),
            profile,
            bookings,
        }
    }
}

async fn profile(State(state): State<Arc<AppState>>) -> Json<ProfileView> {
    let session = state.sessions.current();
    Json(ProfileView::new(session.user(), state.sessions.bookings()))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileUpdateResponse {
    pub notice: Notice,
    pub view: ProfileView,
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ProfileUpdateForm>,
) -> Result<Json<ProfileUpdateResponse>> {
    let updated = accounts::update_profile(&state.sessions, form)?;
    Ok(Json(ProfileUpdateResponse {
        notice: Notice::success("Profile updated successfully!"),
        view: ProfileView::new(Some(&updated), state.sessions.bookings()),
    }))
}
