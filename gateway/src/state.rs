//! Handler context shared across requests

use axum::http::{header::AUTHORIZATION, HeaderMap};
use sha2::{Digest, Sha256};

use crate::{types::Environment, upload::ObjectKey};

/// Immutable configuration the upload handler is built with
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Digest of the shared upload secret; `None` rejects every upload
    upload_token_digest: Option<[u8; 32]>,
    /// Public origin without trailing slashes
    public_base_url: String,
    /// Largest accepted body in bytes
    max_upload_bytes: usize,
}

impl GatewayConfig {
    /// Creates a new gateway configuration
    ///
    /// # Arguments
    ///
    /// * `upload_token` - Shared bearer secret, `None` or empty disables uploads
    /// * `public_base_url` - Origin public URLs are built from
    /// * `max_upload_bytes` - Body size ceiling
    #[must_use]
    pub fn new(upload_token: Option<&str>, public_base_url: &str, max_upload_bytes: usize) -> Self {
        Self {
            upload_token_digest: upload_token
                .filter(|token| !token.is_empty())
                .map(digest),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            max_upload_bytes,
        }
    }

    /// Reads the configuration for `environment`
    ///
    /// # Panics
    ///
    /// Panics if `UPLOAD_TOKEN` is not set in production or staging
    #[must_use]
    pub fn from_environment(environment: &Environment) -> Self {
        Self::new(
            environment.upload_token().as_deref(),
            &environment.public_base_url(),
            environment.max_upload_bytes(),
        )
    }

    /// Whether a secret is configured at all
    #[must_use]
    pub const fn uploads_enabled(&self) -> bool {
        self.upload_token_digest.is_some()
    }

    /// Checks the `Authorization: Bearer <token>` header against the secret
    ///
    /// The prefix is case-sensitive and the token is compared verbatim.
    #[must_use]
    pub fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.upload_token_digest else {
            return false;
        };

        headers
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .filter(|token| !token.is_empty())
            // Digests have a fixed length, so the comparison does not leak the secret's length
            .is_some_and(|token| digest(token) == *expected)
    }

    /// Public URL an object is served from
    #[must_use]
    pub fn public_url(&self, key: &ObjectKey) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    /// Largest accepted body in bytes
    #[must_use]
    pub const fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

fn digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}
