use std::sync::Arc;

use crate::types::{AppError, Environment};
use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{response::IntoResponse, routing::get, Extension, Json};

pub fn handler() -> ApiRouter {
    ApiRouter::new().route("/openapi.json", get(openapi_schema).head(super::not_found))
}

#[allow(clippy::unused_async)]
async fn openapi_schema(
    Extension(environment): Extension<Environment>,
    Extension(openapi): Extension<Arc<OpenApi>>,
) -> impl IntoResponse {
    if !environment.show_api_docs() {
        return AppError::not_found().into_response();
    }
    Json(openapi.as_ref()).into_response()
}
