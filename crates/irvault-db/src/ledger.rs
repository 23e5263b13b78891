//! Warehouse seam used by the API layer.
//!
//! Handlers and the upload pipeline depend on this trait rather than on the
//! concrete repositories, so tests can swap in an in-memory fake.

use async_trait::async_trait;
use irvault_core::models::{MasterDataRow, NewUpload, UploadRecord};
use irvault_core::AppError;
use sqlx::PgPool;

use crate::{ApiKeyRepository, UploadRepository};

#[async_trait]
pub trait UploadLedger: Send + Sync {
    /// Allow-list check for a caller-supplied API key.
    async fn is_valid_api_key(&self, key: &str) -> Result<bool, AppError>;

    /// Append one metadata row for an accepted upload.
    async fn record_upload(&self, upload: &NewUpload) -> Result<UploadRecord, AppError>;

    /// Latest upload per original filename for `user`, newest first.
    async fn master_data(&self, user: &str) -> Result<Vec<MasterDataRow>, AppError>;
}

/// Production ledger backed by the warehouse repositories.
#[derive(Clone)]
pub struct WarehouseLedger {
    api_keys: ApiKeyRepository,
    uploads: UploadRepository,
}

impl WarehouseLedger {
    pub fn new(pool: PgPool, api_key_table: String) -> Self {
        Self {
            api_keys: ApiKeyRepository::new(pool.clone(), api_key_table),
            uploads: UploadRepository::new(pool),
        }
    }
}

#[async_trait]
impl UploadLedger for WarehouseLedger {
    async fn is_valid_api_key(&self, key: &str) -> Result<bool, AppError> {
        self.api_keys.is_valid_api_key(key).await
    }

    async fn record_upload(&self, upload: &NewUpload) -> Result<UploadRecord, AppError> {
        self.uploads.record_upload(upload).await
    }

    async fn master_data(&self, user: &str) -> Result<Vec<MasterDataRow>, AppError> {
        self.uploads.master_data(user).await
    }
}
