//! Storage abstraction trait

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid object name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Identifier and name of an object after a successful upload.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub id: String,
    pub name: String,
    pub web_view_link: Option<String>,
}

/// Storage abstraction trait
///
/// Backends take a staged local file and place it under the configured
/// parent folder. The returned `StoredObject.name` is what the upload
/// endpoints echo back to the caller.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a staged local file under `object_name`.
    async fn upload_file(&self, local_path: &Path, object_name: &str)
        -> StorageResult<StoredObject>;

    /// Delete an object by the identifier returned from `upload_file`.
    /// Not part of any request path; used by tests and cleanup tooling.
    async fn delete(&self, object_id: &str) -> StorageResult<()>;
}
