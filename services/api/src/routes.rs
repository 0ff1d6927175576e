use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use mortgage_rating::book::{book_router, MortgageBook, MortgageRepository};
use mortgage_rating::rating::{rating_router, RatingService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_rating_routes<R>(
    ratings: Arc<RatingService>,
    book: Arc<MortgageBook<R>>,
) -> axum::Router
where
    R: MortgageRepository + 'static,
{
    rating_router(ratings)
        .merge(book_router(book))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryMortgageRepository;
    use tower::ServiceExt;

    fn app() -> axum::Router {
        let ratings = Arc::new(RatingService::default());
        let book = Arc::new(MortgageBook::new(
            Arc::new(InMemoryMortgageRepository::default()),
            ratings.clone(),
        ));
        with_rating_routes(ratings, book)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn rating_and_book_routes_are_mounted() {
        let app = app();

        let health = app
            .clone()
            .oneshot(
                axum::http::Request::get("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("health executes");
        assert_eq!(health.status(), StatusCode::OK);

        let mortgages = app
            .clone()
            .oneshot(
                axum::http::Request::get("/api/v1/mortgages")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("list executes");
        assert_eq!(mortgages.status(), StatusCode::OK);

        let rating = app
            .oneshot(
                axum::http::Request::post("/api/v1/ratings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(r#"{"mortgages":[]}"#))
                    .unwrap(),
            )
            .await
            .expect("rating executes");
        assert_eq!(rating.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
