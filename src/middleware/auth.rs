// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route guard for views that need a signed-in visitor.

use crate::models::Session;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
const HOME_PATH: &str = "/";
const SERVICE_PREFIX: &str = "/service/";
const BOOKING_SUFFIX: &str = "/book";

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect {
        to: &'static str,
        remembered_path: String,
    },
}

/// Decide whether `requested_path` may be rendered for `session`.
///
/// The sign-in and sign-up views are never guarded.
pub fn authorize(session: &Session, requested_path: &str) -> Access {
    if session.is_logged_in() || is_auth_view(requested_path) {
        return Access::Allow;
    }

    Access::Redirect {
        to: LOGIN_PATH,
        remembered_path: viewable_path(requested_path),
    }
}

/// The page to come back to. Booking is a form post, so return to its service view.
fn viewable_path(path: &str) -> String {
    let bare = path.split(['?', '#']).next().unwrap_or(path);
    match bare
        .strip_suffix(BOOKING_SUFFIX)
        .filter(|parent| parent.starts_with(SERVICE_PREFIX))
    {
        Some(service_view) => service_view.to_string(),
        None => path.to_string(),
    }
}

fn is_auth_view(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = path.trim_end_matches('/');
    path == LOGIN_PATH || path == REGISTER_PATH
}

/// Where to send the visitor after signing in.
///
/// Only local absolute paths are honoured; anything else goes home.
pub fn post_login_target(remembered: Option<&str>) -> String {
    match remembered {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => HOME_PATH.to_string(),
    }
}

/// Sign-in URL carrying the remembered path.
pub fn login_redirect_url(remembered_path: &str) -> String {
    format!(
        "{}?from={}",
        LOGIN_PATH,
        urlencoding::encode(remembered_path)
    )
}

/// Middleware that sends anonymous visitors to the sign-in view.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let requested = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    match authorize(&state.sessions.current(), &requested) {
        Access::Allow => next.run(request).await,
        Access::Redirect {
            remembered_path, ..
        } => {
            tracing::debug!(path = %remembered_path, "Redirecting anonymous visitor to sign-in");
            Redirect::to(&login_redirect_url(&remembered_path)).into_response()
        }
    }
}
