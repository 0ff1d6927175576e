use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::errors::RatingError;
use super::service::{PortfolioSubmission, RatingService};

/// Router exposing the portfolio rating endpoint.
pub fn rating_router(service: Arc<RatingService>) -> Router {
    Router::new()
        .route("/api/v1/ratings", post(rate_handler))
        .with_state(service)
}

pub(crate) async fn rate_handler(
    State(service): State<Arc<RatingService>>,
    axum::Json(submission): axum::Json<PortfolioSubmission>,
) -> Response {
    match service.rate(&submission) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(RatingError::EmptyPortfolio { excluded }) => {
            let payload = json!({
                "error": RatingError::EmptyPortfolio { excluded }.to_string(),
                "excluded": excluded,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
