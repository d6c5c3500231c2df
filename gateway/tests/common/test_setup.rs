use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use image_gateway::{
    object_storage::{InMemoryObjectStore, ObjectStore},
    server,
    state::GatewayConfig,
    types::Environment,
};
use tower::ServiceExt;

pub const TEST_TOKEN: &str = "secret";
pub const TEST_PUBLIC_BASE_URL: &str = "https://images.example.com/";
pub const TEST_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Upload headers, each `None` field is left off the request
#[derive(Debug, Clone)]
pub struct UploadHeaders {
    pub authorization: Option<String>,
    pub product_id: Option<String>,
    pub view_index: Option<String>,
    pub ext: Option<String>,
}

impl Default for UploadHeaders {
    fn default() -> Self {
        Self {
            authorization: Some(format!("Bearer {TEST_TOKEN}")),
            product_id: Some("Acme Widget #9".to_string()),
            view_index: Some("01".to_string()),
            ext: Some("jpg".to_string()),
        }
    }
}

/// Router wired to an in-memory store
pub struct TestContext {
    pub router: Router,
    pub store: Arc<InMemoryObjectStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(GatewayConfig::new(
            Some(TEST_TOKEN),
            TEST_PUBLIC_BASE_URL,
            TEST_MAX_UPLOAD_BYTES,
        ))
    }

    pub fn with_config(config: GatewayConfig) -> Self {
        Self::with_environment(Environment::Development, config)
    }

    pub fn with_environment(environment: Environment, config: GatewayConfig) -> Self {
        setup_test_env();

        let store = Arc::new(InMemoryObjectStore::new());
        let object_store: Arc<dyn ObjectStore> = store.clone();
        let router = server::router(environment, Arc::new(config), object_store);

        Self { router, store }
    }

    pub async fn send_upload(
        &self,
        headers: &UploadHeaders,
        body: impl Into<Body>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        send_upload(&self.router, headers, body).await
    }

    pub async fn send_request(
        &self,
        method: &str,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method(method)
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}

/// Sends `POST /upload` to any router
pub async fn send_upload(
    router: &Router,
    headers: &UploadHeaders,
    body: impl Into<Body>,
) -> Result<Response, Box<dyn std::error::Error>> {
    let mut request = Request::builder()
        .uri("/upload")
        .method("POST")
        .header("Content-Type", "application/octet-stream");

    for (name, value) in [
        ("Authorization", &headers.authorization),
        ("x-product-id", &headers.product_id),
        ("x-view-index", &headers.view_index),
        ("x-ext", &headers.ext),
    ] {
        if let Some(value) = value {
            request = request.header(name, value.as_str());
        }
    }

    let response = router.clone().oneshot(request.body(body.into())?).await?;
    Ok(response)
}
