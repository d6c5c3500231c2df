mod docs;
mod health;
pub mod upload;

use aide::axum::{routing::post, ApiRouter};
use axum::routing::get;

use crate::types::AppError;

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .route("/health", get(health::handler).head(not_found))
        .api_route("/upload", post(upload::handler))
}

/// Answers every request no route claims, including a known path with the wrong method.
///
/// `GET` routes register this for `HEAD` too, axum would otherwise answer it.
#[allow(clippy::unused_async)]
pub async fn not_found() -> AppError {
    AppError::not_found()
}
