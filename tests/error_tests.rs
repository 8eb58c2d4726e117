// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use warmpaws::error::{AppError, PROVIDER_SIGN_IN_FAILED};
use warmpaws::models::forms::FormRejection;
use warmpaws::services::IdentityError;

async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_identity_errors_share_one_notice() {
    let (status, body) = body_of(IdentityError::Rejected("bad audience".into()).into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["notice"]["message"], PROVIDER_SIGN_IN_FAILED);
    // Provider detail stays in the logs
    assert!(body.get("details").is_none());

    let (status, body) = body_of(IdentityError::Unavailable("timeout".into()).into()).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["notice"]["message"], PROVIDER_SIGN_IN_FAILED);
}

#[tokio::test]
async fn test_validation_error_lists_fields() {
    let rejection = FormRejection {
        message: "Please enter your full name".to_string(),
        fields: vec!["full_name: Please enter your full name".to_string()],
    };

    let (status, body) = body_of(rejection.into()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["fields"][0], "full_name: Please enter your full name");
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let (status, body) = body_of(anyhow::anyhow!("disk on fire").into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("fields").is_none());
    assert!(!body.to_string().contains("disk on fire"));
}
