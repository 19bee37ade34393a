//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests call `IntoResponse` directly on `AppError` values; no server
//! or database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use horology_api::error::AppError;
use horology_core::error::CoreError;
use horology_reports::ReportError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Core errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_not_found_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Watch",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Watch with id 42 not found");
}

#[tokio::test]
async fn test_validation_returns_400() {
    let err = AppError::Core(CoreError::Validation(
        "case_diameter must be at least 20 mm, got 12".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "case_diameter must be at least 20 mm, got 12");
}

#[tokio::test]
async fn test_conflict_returns_409() {
    let err = AppError::Core(CoreError::Conflict("duplicate reference".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn test_unauthorized_and_forbidden() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) = error_to_response(AppError::Core(CoreError::Forbidden(
        "Admin API is disabled".into(),
    )))
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_core_internal_is_sanitized() {
    let err = AppError::Core(CoreError::Internal("connection string leaked".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// HTTP-specific errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_bad_request_returns_400() {
    let err = AppError::BadRequest("watch_ids must not be empty".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "watch_ids must not be empty");
}

#[tokio::test]
async fn test_internal_error_is_sanitized() {
    let err = AppError::InternalError("Could not allocate a serial number".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json.to_string().contains("serial"));
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_empty_selection_returns_400() {
    let (status, json) = error_to_response(AppError::Report(ReportError::EmptySelection)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "watch_ids must not be empty");
}

#[tokio::test]
async fn test_too_many_watches_returns_400() {
    let err = AppError::Report(ReportError::TooManyWatches { max: 6, got: 7 });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = json["error"].as_str().unwrap();
    assert!(message.contains('6') && message.contains('7'), "{message}");
}

#[tokio::test]
async fn test_chart_failure_returns_500() {
    let err = AppError::Report(ReportError::Chart("no chart font registered".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Database errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_pool_timeout_returns_500() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}
