//! Router-level tests for requests rejected before any database query.
//!
//! The pool is created lazily and never connects, so these run without
//! `DATABASE_URL`.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_config, admin_request, body_bytes, body_json, build_test_app, build_test_app_with, get,
    json_request, lazy_pool, post_json, ADMIN_TOKEN,
};

fn valid_watch() -> serde_json::Value {
    serde_json::json!({
        "brand_id": 1,
        "model_name": "Nautilus",
        "reference_number": "5711/1A",
        "price": "30000.00",
        "case_diameter": 40,
        "movement_type": "AUTO",
        "case_material": "STEEL",
        "water_resistance": 120,
    })
}

// ---------------------------------------------------------------------------
// General routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = build_test_app(lazy_pool());
    let response = get(app, "/api/v1/straps").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let app = build_test_app(lazy_pool());
    let response = get(app, "/api/v1/straps").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_media_files_are_served() {
    // The test config serves this crate's directory as media.
    let app = build_test_app(lazy_pool());
    let response = get(app, "/media/Cargo.toml").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("horology-api"));
}

// ---------------------------------------------------------------------------
// Listing parameters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_ordering_field_returns_400() {
    let app = build_test_app(lazy_pool());
    let response = get(app, "/api/v1/watches?ordering=-serial_number").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_brand_ordering_returns_400() {
    let app = build_test_app(lazy_pool());
    let response = get(app, "/api/v1/brands?ordering=country").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_filter_value_returns_400() {
    let app = build_test_app(lazy_pool());
    let response = get(app, "/api/v1/watches?case_material=WOOD").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_export_with_empty_ids_returns_400() {
    for path in [
        "/api/v1/watches/export-certificates",
        "/api/v1/watches/export-pdf",
        "/api/v1/watches/export-wishlist",
        "/api/v1/watches/export-comparison",
    ] {
        let app = build_test_app(lazy_pool());
        let response = post_json(app, path, serde_json::json!({ "watch_ids": [] })).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "watch_ids must not be empty");
    }
}

#[tokio::test]
async fn test_comparison_rejects_seven_watches() {
    let app = build_test_app(lazy_pool());
    let response = post_json(
        app,
        "/api/v1/watches/export-comparison",
        serde_json::json!({ "watch_ids": [1, 2, 3, 4, 5, 6, 7] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Admin guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_admin_disabled_without_token_config() {
    let app = build_test_app(lazy_pool());
    let response = admin_request(
        app,
        Method::GET,
        "/api/v1/admin/export/database",
        Some(ADMIN_TOKEN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_missing_header_returns_401() {
    let app = build_test_app_with(lazy_pool(), admin_config());
    let response = admin_request(app, Method::DELETE, "/api/v1/admin/brands/1", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_wrong_token_returns_401() {
    let app = build_test_app_with(lazy_pool(), admin_config());
    let response = admin_request(
        app,
        Method::GET,
        "/api/v1/admin/export/database",
        Some("not-the-token"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid admin token");
}

#[tokio::test]
async fn test_admin_create_watch_rejects_small_case() {
    let mut body = valid_watch();
    body["case_diameter"] = serde_json::json!(12);

    let app = build_test_app_with(lazy_pool(), admin_config());
    let response = json_request(
        app,
        Method::POST,
        "/api/v1/admin/watches",
        body,
        Some(ADMIN_TOKEN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_admin_create_watch_rejects_negative_price() {
    let mut body = valid_watch();
    body["price"] = serde_json::json!("-1.00");

    let app = build_test_app_with(lazy_pool(), admin_config());
    let response = json_request(
        app,
        Method::POST,
        "/api/v1/admin/watches",
        body,
        Some(ADMIN_TOKEN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_create_watch_rejects_malformed_serial() {
    let mut body = valid_watch();
    body["serial_number"] = serde_json::json!("ABC-1");

    let app = build_test_app_with(lazy_pool(), admin_config());
    let response = json_request(
        app,
        Method::POST,
        "/api/v1/admin/watches",
        body,
        Some(ADMIN_TOKEN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("serial_number"));
}

#[tokio::test]
async fn test_admin_update_brand_rejects_blank_name() {
    let app = build_test_app_with(lazy_pool(), admin_config());
    let response = json_request(
        app,
        Method::PUT,
        "/api/v1/admin/brands/1",
        serde_json::json!({ "name": "   " }),
        Some(ADMIN_TOKEN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
