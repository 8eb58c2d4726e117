// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in, sign-up and sign-out routes.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::models::forms::{
    ForgotPasswordForm, LoginForm, ProviderSignInForm, RegisterForm, MIN_PASSWORD_LEN,
};
use crate::models::{Notice, SessionView};
use crate::services::accounts::{self, Outcome};
use crate::time_utils::today_utc;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login_view).post(login))
        .route("/register", get(register_view).post(register))
        .route("/auth/google", post(google_sign_in))
        .route("/logout", post(logout))
        .route("/forgot-password", post(forgot_password))
}

/// Response to an accepted auth form.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub notice: Notice,
    pub redirect_to: Option<String>,
    pub session: SessionView,
}

impl AuthResponse {
    fn new(outcome: Outcome, state: &AppState) -> Self {
        Self {
            notice: outcome.notice,
            redirect_to: outcome.redirect_to,
            session: SessionView::from(&state.sessions.current()),
        }
    }
}

// ─── Views ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct LoginViewParams {
    #[serde(default)]
    from: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginView {
    /// Path the guard remembered; echoed back on submit.
    pub from: Option<String>,
    pub google_client_id: String,
    pub session: SessionView,
}

async fn login_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LoginViewParams>,
) -> Json<LoginView> {
    Json(LoginView {
        from: params.from,
        google_client_id: state.config.google_client_id.clone(),
        session: SessionView::from(&state.sessions.current()),
    })
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterView {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub min_password_length: u64,
    pub password_rules: Vec<String>,
}

async fn register_view() -> Json<RegisterView> {
    Json(RegisterView {
        min_password_length: MIN_PASSWORD_LEN,
        password_rules: vec![
            format!("At least {MIN_PASSWORD_LEN} characters"),
            "At least one uppercase letter".to_string(),
            "At least one lowercase letter".to_string(),
        ],
    })
}

// ─── Submissions ─────────────────────────────────────────────

async fn login(
    State(state): State<Arc<AppState>>,
    Json(form): Json<LoginForm>,
) -> Result<Json<AuthResponse>> {
    let outcome = accounts::sign_in_local(&state.sessions, form)?;
    Ok(Json(AuthResponse::new(outcome, &state)))
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegisterForm>,
) -> Result<Json<AuthResponse>> {
    let outcome = accounts::register(&state.sessions, form, today_utc())?;
    Ok(Json(AuthResponse::new(outcome, &state)))
}

/// Google Sign-In: the front-end posts the ID token it received from Google.
async fn google_sign_in(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ProviderSignInForm>,
) -> Result<Json<AuthResponse>> {
    let outcome = accounts::sign_in_with_provider(
        &state.sessions,
        state.identity.as_ref(),
        form,
        today_utc(),
    )
    .await?;
    Ok(Json(AuthResponse::new(outcome, &state)))
}

async fn logout(State(state): State<Arc<AppState>>) -> Json<AuthResponse> {
    let notice = state.sessions.logout();
    Json(AuthResponse {
        notice,
        redirect_to: None,
        session: SessionView::from(&state.sessions.current()),
    })
}

async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ForgotPasswordForm>,
) -> Result<Json<AuthResponse>> {
    let outcome = accounts::forgot_password(form)?;
    Ok(Json(AuthResponse::new(outcome, &state)))
}
