//! Web API tests driving the router in-process

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tripcraft::api::AppState;
use tripcraft::{
    CompletionRequest, CompletionService, TripCraftConfig, TripCraftError, TripPlanner, web,
};

struct FakeService {
    fail: bool,
}

#[async_trait]
impl CompletionService for FakeService {
    async fn complete(&self, _request: CompletionRequest) -> tripcraft::Result<String> {
        if self.fail {
            Err(TripCraftError::service_unavailable("connection refused"))
        } else {
            Ok("Day 1 - Arrival".to_string())
        }
    }
}

fn app(fail: bool) -> Router {
    let planner = TripPlanner::new(Arc::new(FakeService { fail }), TripCraftConfig::default());
    web::app(Arc::new(AppState { planner }))
}

fn plan_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/plan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_plan_endpoint_returns_generated_plan() {
    let response = app(false)
        .oneshot(plan_request(
            r#"{
                "origin": "Berlin",
                "destination": "Lisbon",
                "start_date": "2026-09-10",
                "end_date": "2026-09-14",
                "travelers": 2,
                "preferences": ["Food", "Nature"]
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let plan = json_body(response).await;
    assert_eq!(plan["destination"], "Lisbon");
    assert_eq!(plan["duration_days"], 4);
    assert_eq!(plan["itinerary"], "Day 1 - Arrival");
}

#[tokio::test]
async fn test_invalid_input_maps_to_bad_request() {
    let response = app(false)
        .oneshot(plan_request(
            r#"{
                "destination": "",
                "start_date": "2026-09-10",
                "end_date": "2026-09-14"
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Invalid input")
    );
}

#[tokio::test]
async fn test_service_failure_maps_to_service_unavailable() {
    let response = app(true)
        .oneshot(plan_request(
            r#"{
                "destination": "Lisbon",
                "start_date": "2026-09-10",
                "end_date": "2026-09-14"
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_preferences_endpoint_lists_interest_tags() {
    let response = app(false)
        .oneshot(
            Request::builder()
                .uri("/api/preferences")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let tags = json_body(response).await;
    let tags = tags.as_array().unwrap();
    assert_eq!(tags.len(), 7);
    assert!(tags.iter().any(|tag| tag == "Culture"));
}

#[tokio::test]
async fn test_health_endpoint_reports_version() {
    let response = app(false)
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], tripcraft::VERSION);
}
