use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::repository::{MortgageRepository, RepositoryError};
use super::service::{BookError, MortgageBook};
use crate::rating::domain::{MortgageId, MortgageRecord};
use crate::rating::RatingError;

/// Router exposing mortgage CRUD endpoints and the stored-book rating.
pub fn book_router<R>(book: Arc<MortgageBook<R>>) -> Router
where
    R: MortgageRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/mortgages",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/v1/mortgages/:mortgage_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route("/api/v1/ratings/book", get(rate_book_handler::<R>))
        .with_state(book)
}

pub(crate) async fn create_handler<R>(
    State(book): State<Arc<MortgageBook<R>>>,
    axum::Json(submission): axum::Json<MortgageRecord>,
) -> Response
where
    R: MortgageRepository + 'static,
{
    match book.create(submission) {
        Ok(entry) => (StatusCode::CREATED, axum::Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(State(book): State<Arc<MortgageBook<R>>>) -> Response
where
    R: MortgageRepository + 'static,
{
    match book.list() {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(book): State<Arc<MortgageBook<R>>>,
    Path(mortgage_id): Path<String>,
) -> Response
where
    R: MortgageRepository + 'static,
{
    match book.get(&MortgageId(mortgage_id)) {
        Ok(entry) => (StatusCode::OK, axum::Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(book): State<Arc<MortgageBook<R>>>,
    Path(mortgage_id): Path<String>,
    axum::Json(submission): axum::Json<MortgageRecord>,
) -> Response
where
    R: MortgageRepository + 'static,
{
    match book.update(&MortgageId(mortgage_id), submission) {
        Ok(entry) => (StatusCode::OK, axum::Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(book): State<Arc<MortgageBook<R>>>,
    Path(mortgage_id): Path<String>,
) -> Response
where
    R: MortgageRepository + 'static,
{
    match book.delete(&MortgageId(mortgage_id)) {
        Ok(()) => {
            let payload = json!({ "message": "mortgage deleted" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rate_book_handler<R>(State(book): State<Arc<MortgageBook<R>>>) -> Response
where
    R: MortgageRepository + 'static,
{
    match book.rate_book() {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: BookError) -> Response {
    let status = match &error {
        BookError::Invalid(_)
        | BookError::Unratable(_)
        | BookError::Rating(RatingError::EmptyPortfolio { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        BookError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        BookError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        BookError::Rating(RatingError::InvalidScore(_))
        | BookError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = match &error {
        BookError::Invalid(problems) => json!({
            "error": "invalid mortgage",
            "problems": problems,
        }),
        other => json!({ "error": other.to_string() }),
    };

    (status, axum::Json(payload)).into_response()
}
