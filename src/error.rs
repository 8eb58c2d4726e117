// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Every error body carries a `notice` the front-end shows as a toast.

use crate::models::forms::FormRejection;
use crate::models::Notice;
use crate::services::identity::IdentityError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const PROVIDER_SIGN_IN_FAILED: &str = "Failed to sign in with Google. Please try again.";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {}", .0.message)]
    Validation(FormRejection),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection)
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
    notice: Notice,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields = Vec::new();
        let (status, error, details, notice) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                None,
                Notice::error("Please sign in to continue"),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "not_found",
                Some(msg.clone()),
                Notice::error(msg),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                Some(msg.clone()),
                Notice::error(msg),
            ),
            AppError::Validation(rejection) => {
                fields = rejection.fields;
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "validation_failed",
                    None,
                    Notice::error(rejection.message),
                )
            }
            AppError::Identity(err) => {
                tracing::warn!(error = %err, "Identity provider sign-in failed");
                let status = match err {
                    IdentityError::Rejected(_) => StatusCode::UNAUTHORIZED,
                    IdentityError::Unavailable(_) => StatusCode::BAD_GATEWAY,
                };
                (
                    status,
                    "identity_error",
                    None,
                    Notice::error(PROVIDER_SIGN_IN_FAILED),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    None,
                    Notice::error("Something went wrong. Please try again."),
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            fields,
            notice,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
