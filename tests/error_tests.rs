use axum::{http::StatusCode, response::IntoResponse};
use eventhorizon::error::AppError;
use http_body_util::BodyExt;
use sea_orm::DbErr;
use serde_json::Value;

// Test for AppError Display implementation
#[test]
fn test_app_error_display() {
    let error = AppError::NotFound("Campaign".to_string());
    assert_eq!(error.to_string(), "Campaign not found");

    let error = AppError::Validation("contribution amount must be positive".to_string());
    assert_eq!(
        error.to_string(),
        "Validation error: contribution amount must be positive"
    );

    let error = AppError::Database(DbErr::Custom("connection lost".to_string()));
    assert_eq!(
        error.to_string(),
        "Database error: Custom Error: connection lost"
    );
}

// Test for AppError IntoResponse implementation
#[tokio::test]
async fn test_app_error_into_response() {
    let error = AppError::NotFound("Campaign".to_string());
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["error"], "Campaign not found");

    let error = AppError::Validation("contributor name must not be empty".to_string());
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(
        body["error"],
        "Validation error: contributor name must not be empty"
    );

    let error = AppError::Database(DbErr::Custom("connection lost".to_string()));
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_db_err_converts_to_database_variant() {
    let error: AppError = DbErr::Custom("boom".to_string()).into();
    assert!(matches!(error, AppError::Database(_)));
}
