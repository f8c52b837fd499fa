mod mocks;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::test_helpers::{TestError, TestResult, test_utils};
use http_body_util::BodyExt;
use mocks::{MockScoreStorage, WordPayload, length_scorer};
use processing::{
    error::StorageError,
    executable_utils::{AppState, NOT_FOUND_MESSAGE, build_router},
    model::{MessageResponse, PointsResponse, ProcessedResponse},
    processor::Processor,
    storage::{InMemoryScoreStorage, ScoreStorage},
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app(storage: Arc<dyn ScoreStorage>) -> TestResult<Router> {
    let processor = Arc::new(Processor::<WordPayload, _>::new(length_scorer(), storage));
    build_router(AppState::new(processor, None), None)
        .map_err(|e| TestError::generic(format!("Failed to build router: {}", e)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<String>) -> TestResult<(StatusCode, Vec<u8>)> {
    let request = test_utils::build_request(method, uri, body)?;
    let (parts, body) = request.into_parts();
    let request = Request::from_parts(parts, Body::from(body));

    let response = app
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| TestError::generic(format!("Request failed: {}", e)))?;
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .map_err(|e| TestError::generic(format!("Failed to read body: {}", e)))?
        .to_bytes();
    Ok((status, bytes.to_vec()))
}

#[tokio::test]
async fn process_then_fetch_points() -> TestResult {
    let app = create_test_app(Arc::new(InMemoryScoreStorage::new()))?;

    let body = json!({ "word": "receipt" }).to_string();
    let (status, bytes) = send(&app, "POST", "/receipts/process", Some(body)).await?;
    test_utils::check_status_code(status, StatusCode::CREATED)?;
    let processed: ProcessedResponse = serde_json::from_slice(&bytes)?;

    let uri = format!("/receipts/{}/points", processed.id);
    let (status, bytes) = send(&app, "GET", &uri, None).await?;
    test_utils::check_status_code(status, StatusCode::OK)?;
    let points: PointsResponse = serde_json::from_slice(&bytes)?;
    common::test_assert_eq!(points.points, 7);

    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> TestResult {
    let app = create_test_app(Arc::new(InMemoryScoreStorage::new()))?;

    let (status, bytes) = send(&app, "POST", "/receipts/process", Some("{invalid json}".to_string())).await?;
    test_utils::check_status_code(status, StatusCode::BAD_REQUEST)?;
    let message: MessageResponse = serde_json::from_slice(&bytes)?;
    common::test_assert!(message.message.starts_with("The receipt is invalid."));

    Ok(())
}

#[tokio::test]
async fn wrong_field_type_is_a_bad_request() -> TestResult {
    let app = create_test_app(Arc::new(InMemoryScoreStorage::new()))?;

    let body = json!({ "word": 12 }).to_string();
    let (status, _) = send(&app, "POST", "/receipts/process", Some(body)).await?;
    test_utils::check_status_code(status, StatusCode::BAD_REQUEST)
}

#[tokio::test]
async fn missing_content_type_is_a_bad_request() -> TestResult {
    let app = create_test_app(Arc::new(InMemoryScoreStorage::new()))?;

    let request = Request::builder()
        .uri("/receipts/process")
        .method("POST")
        .body(Body::from(json!({ "word": "abc" }).to_string()))?;
    let response = app
        .oneshot(request)
        .await
        .map_err(|e| TestError::generic(format!("Request failed: {}", e)))?;
    test_utils::check_status_code(response.status(), StatusCode::BAD_REQUEST)
}

#[tokio::test]
async fn validation_failure_is_a_bad_request() -> TestResult {
    let app = create_test_app(Arc::new(InMemoryScoreStorage::new()))?;

    let (status, bytes) = send(&app, "POST", "/receipts/process", Some("{}".to_string())).await?;
    test_utils::check_status_code(status, StatusCode::BAD_REQUEST)?;
    let message: MessageResponse = serde_json::from_slice(&bytes)?;
    common::test_assert!(
        message.message.contains("word"),
        "message should name the missing field: {}",
        message.message
    );

    Ok(())
}

#[tokio::test]
async fn unknown_id_is_not_found() -> TestResult {
    let app = create_test_app(Arc::new(InMemoryScoreStorage::new()))?;

    for uri in [
        "/receipts/7fb1377b-b223-49d9-a31a-5a02701dd310/points",
        "/receipts/not-an-id/points",
    ] {
        let (status, bytes) = send(&app, "GET", uri, None).await?;
        test_utils::check_status_code(status, StatusCode::NOT_FOUND)?;
        let message: MessageResponse = serde_json::from_slice(&bytes)?;
        common::test_assert_eq!(message.message, NOT_FOUND_MESSAGE);
    }

    Ok(())
}

#[tokio::test]
async fn storage_failure_is_an_internal_error() -> TestResult {
    let mut storage = MockScoreStorage::new();
    storage
        .expect_insert()
        .returning(|_| Err(StorageError::Backend("disk on fire".to_string())));
    let app = create_test_app(Arc::new(storage))?;

    let body = json!({ "word": "abc" }).to_string();
    let (status, bytes) = send(&app, "POST", "/receipts/process", Some(body)).await?;
    test_utils::check_status_code(status, StatusCode::INTERNAL_SERVER_ERROR)?;
    let message: MessageResponse = serde_json::from_slice(&bytes)?;
    common::test_assert!(!message.message.contains("disk on fire"));

    Ok(())
}

#[tokio::test]
async fn health_and_disabled_metrics() -> TestResult {
    let app = create_test_app(Arc::new(InMemoryScoreStorage::new()))?;

    let (status, bytes) = send(&app, "GET", "/health", None).await?;
    test_utils::check_status_code(status, StatusCode::OK)?;
    common::test_assert_eq!(bytes, b"OK".to_vec());

    let (status, _) = send(&app, "GET", "/metrics", None).await?;
    test_utils::check_status_code(status, StatusCode::NOT_FOUND)
}

#[tokio::test]
async fn invalid_cors_origin_fails_router_construction() {
    let processor = Arc::new(Processor::<WordPayload, _>::new(
        length_scorer(),
        Arc::new(InMemoryScoreStorage::new()),
    ));
    let result = build_router(AppState::new(processor, None), Some("bad\norigin"));
    assert!(result.is_err());
}
