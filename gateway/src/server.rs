use std::{sync::Arc, time::Duration};

use aide::openapi::OpenApi;
use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Extension, Router,
};
use datadog_tracing::axum::{shutdown_signal, OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;

use crate::routes;
use crate::{
    object_storage::ObjectStore,
    state::GatewayConfig,
    types::{AppError, Environment},
};

/// Builds the application router with its dependencies attached
///
/// Requests that match no route, or match a path with the wrong method,
/// get `404 {"error":"not_found"}`.
pub fn router(
    environment: Environment,
    config: Arc<GatewayConfig>,
    object_store: Arc<dyn ObjectStore>,
) -> Router {
    let mut openapi = OpenApi::default();

    let router = routes::handler()
        .finish_api(&mut openapi)
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::not_found);

    router
        .layer(Extension(Arc::new(openapi)))
        .layer(Extension(environment))
        .layer(Extension(config))
        .layer(Extension(object_store))
}

/// Bounds every request to `timeout`
///
/// A request still running when it elapses gets
/// `408 {"error":"request_timeout"}`.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router
        .layer(tower_http::timeout::TimeoutLayer::new(timeout))
        .layer(middleware::map_response(timeout_envelope))
}

/// `TimeoutLayer` answers with an empty 408, no handler returns one itself
#[allow(clippy::unused_async)]
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        AppError::request_timeout().into_response()
    } else {
        response
    }
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    config: Arc<GatewayConfig>,
    object_store: Arc<dyn ObjectStore>,
) -> anyhow::Result<()> {
    let request_timeout = environment.request_timeout();
    let port = environment.port()?;

    let router = router(environment, config, object_store);
    let router = with_request_timeout(router, request_timeout)
        // Include trace context as header into the response
        .layer(OtelInResponseLayer)
        // Start OpenTelemetry trace on incoming request
        .layer(OtelAxumLayer::default());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Image Gateway started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}
