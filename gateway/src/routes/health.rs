/// Health check endpoint
///
/// Plain-text liveness probe, touches no dependencies.
#[allow(clippy::unused_async)]
pub async fn handler() -> &'static str {
    "ok"
}
