use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use image_gateway::{
    object_storage::{ObjectStore, S3ObjectStore},
    server,
    state::GatewayConfig,
    types::Environment,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production (Datadog), regular format for development
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();
    if environment.json_logs() {
        fmt().json().with_env_filter(env_filter).init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Starting Image Gateway in {environment} environment");

    let config = Arc::new(GatewayConfig::from_environment(&environment));
    if !config.uploads_enabled() {
        tracing::warn!("UPLOAD_TOKEN is not set, every upload will be rejected");
    }

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let s3_store = S3ObjectStore::new(s3_client, environment.s3_bucket());
    tracing::info!("✅ Writing images to bucket {}", s3_store.bucket_name());

    let object_store: Arc<dyn ObjectStore> = Arc::new(s3_store);

    server::start(environment, config, object_store).await
}
