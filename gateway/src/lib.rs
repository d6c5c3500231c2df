//! Product image upload gateway
//!
//! Accepts authenticated image uploads and writes them to an S3-compatible
//! bucket at `products/<product>/view_<NN>.<ext>`.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Object storage backends
pub mod object_storage;

/// HTTP route handlers
pub mod routes;

/// Server bootstrap
pub mod server;

/// Handler configuration
pub mod state;

/// Shared types: environment, errors, extractors
pub mod types;

/// Upload validation and key derivation
pub mod upload;
