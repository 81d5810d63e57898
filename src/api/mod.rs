//! JSON API for the web front-end

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::TripCraftError;
use crate::email;
use crate::models::{Interest, TripPlan, TripRequest};
use crate::planner::TripPlanner;

/// Shared state for API handlers
pub struct AppState {
    pub planner: TripPlanner,
}

/// Build the `/api` router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan", post(create_plan))
        .route("/plan/share", post(share_plan))
        .route("/preferences", get(get_preferences))
        .route("/health", get(health))
        .with_state(state)
}

/// Error wrapper mapping application errors onto HTTP responses
pub struct ApiError(TripCraftError);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TripCraftError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            TripCraftError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<TripCraftError> for ApiError {
    fn from(err: TripCraftError) -> Self {
        ApiError(err)
    }
}

async fn create_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TripRequest>,
) -> Result<Json<TripPlan>, ApiError> {
    let plan = state.planner.generate_plan(request).await?;
    Ok(Json(plan))
}

async fn get_preferences() -> Json<Vec<String>> {
    Json(Interest::ALL.iter().map(ToString::to_string).collect())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
    })
}

/// Request body for sharing a plan by e-mail
#[derive(Deserialize)]
struct ShareRequest {
    recipient: String,
    plan: TripPlan,
}

async fn share_plan(Json(share): Json<ShareRequest>) -> Result<StatusCode, ApiError> {
    email::send_plan(&share.plan, &share.recipient)
        .await
        .map_err(|e| {
            tracing::error!("Failed to share plan: {e}");
            ApiError(TripCraftError::service_unavailable(
                "Could not send the share email",
            ))
        })?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_400() {
        let response =
            ApiError(TripCraftError::invalid_input("Destination cannot be empty")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_service_unavailable_maps_to_503() {
        let response =
            ApiError(TripCraftError::service_unavailable("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let response = ApiError(TripCraftError::general("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
