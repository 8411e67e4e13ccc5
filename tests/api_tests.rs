// SPDX-License-Identifier: MIT

//! API surface tests driven through the full router.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn add_runner_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/runners")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app(None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_runner_returns_not_found() {
    let (app, _state) = common::create_test_app(None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/runners/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_runner_rejects_non_numeric_pin() {
    let (app, _state) = common::create_test_app(Some(common::MID_RACE_FEED));

    let response = app
        .oneshot(add_runner_request(
            r#"{"bib_number": "7", "name": "Ana", "password": "abcd"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_runner_response_omits_password() {
    let (app, _state) = common::create_test_app(Some(common::MID_RACE_FEED));

    let response = app
        .oneshot(add_runner_request(
            r#"{"bib_number": "7", "name": "Ana", "password": "1234"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["bib_number"], "7");
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn test_add_runner_with_unknown_bib_returns_not_found() {
    // Provider has no data for this bib, so registration must fail
    let (app, _state) = common::create_test_app(None);

    let response = app
        .oneshot(add_runner_request(
            r#"{"bib_number": "404", "name": "Ana", "password": "1234"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_matching_password() {
    let (app, state) = common::create_test_app(Some(common::MID_RACE_FEED));

    let response = app
        .clone()
        .oneshot(add_runner_request(
            r#"{"bib_number": "7", "name": "Ana", "password": "1234"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/runners/7")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"password": "9999"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(state.store.get("7").is_some());

    // The administrative secret also unlocks deletion
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/runners/7")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"password": "8282"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.store.get("7").is_none());
}
