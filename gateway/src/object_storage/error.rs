//! Error types for object storage operations

use aws_sdk_s3::{error::SdkError, operation::put_object::PutObjectError};
use thiserror::Error;

/// Result type for object storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while writing to object storage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend answered 5xx, timed out or could not be reached
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the write (access denied, missing bucket, ...)
    #[error("Storage backend rejected the write: {0}")]
    Rejected(String),
}

impl From<SdkError<PutObjectError>> for StorageError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        match &error {
            SdkError::ServiceError(service_err) if service_err.raw().status().as_u16() >= 500 => {
                Self::Unavailable(format!("{:?}", service_err.err()))
            }
            SdkError::ServiceError(service_err) => {
                Self::Rejected(format!("{:?}", service_err.err()))
            }
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
                Self::Unavailable(error.to_string())
            }
            _ => Self::Rejected(error.to_string()),
        }
    }
}
