// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking and form validation tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{json_request, send, sign_in};

#[tokio::test]
async fn test_booking_confirmed() {
    let (app, _) = common::create_test_app();
    sign_in(&app).await;

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/service/2/book",
            json!({ "name": "Mia Chen", "email": "mia@example.com" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"]["level"], "success");
    assert_eq!(
        body["notice"]["message"],
        "Booking Confirmed! Winter Grooming & Paw Treatment. We'll contact you at mia@example.com"
    );
}

#[tokio::test]
async fn test_booking_without_slots_rejected() {
    let (app, _) = common::create_test_app();
    sign_in(&app).await;

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/service/5/book",
            json!({ "name": "Mia Chen", "email": "mia@example.com" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["notice"]["message"], "No slots available");
}

#[tokio::test]
async fn test_booking_unknown_service() {
    let (app, _) = common::create_test_app();
    sign_in(&app).await;

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/service/42/book",
            json!({ "name": "Mia Chen", "email": "mia@example.com" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_booking_form_reports_fields_in_order() {
    let (app, _) = common::create_test_app();
    sign_in(&app).await;

    let (status, _, body) = send(
        &app,
        json_request("POST", "/service/1/book", json!({ "name": " ", "email": "mia" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["notice"]["message"], "Please enter your full name");
    assert_eq!(
        body["fields"],
        json!([
            "name: Please enter your full name",
            "email: Please enter a valid email address"
        ])
    );
}

#[tokio::test]
async fn test_profile_photo_must_be_url() {
    let (app, state) = common::create_test_app();
    sign_in(&app).await;

    let (status, _, body) = send(
        &app,
        json_request(
            "PUT",
            "/my-profile",
            json!({ "displayName": "Mia", "photoUrl": "not a url" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["notice"]["message"], "Photo URL must be a valid URL");
    let user = state.sessions.current().user().cloned().unwrap();
    assert_eq!(user.display_name, "John Doe");
}

#[tokio::test]
async fn test_non_numeric_service_id_rejected() {
    let (app, _) = common::create_test_app();
    sign_in(&app).await;

    let (status, _, _) = send(&app, common::get("/service/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
