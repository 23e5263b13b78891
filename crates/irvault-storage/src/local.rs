//! Local filesystem storage implementation, used in tests and development.

use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;
        Ok(LocalStorage { base_path })
    }

    /// Object names are flat; anything that could traverse out of the base
    /// directory is rejected.
    fn object_path(&self, object_name: &str) -> StorageResult<PathBuf> {
        if object_name.is_empty()
            || object_name.contains("..")
            || object_name.contains('/')
            || object_name.contains('\\')
        {
            return Err(StorageError::InvalidName(object_name.to_string()));
        }
        Ok(self.base_path.join(object_name))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_file(
        &self,
        local_path: &Path,
        object_name: &str,
    ) -> StorageResult<StoredObject> {
        let target = self.object_path(object_name)?;
        fs::copy(local_path, &target).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "{} -> {}: {}",
                local_path.display(),
                target.display(),
                e
            ))
        })?;

        Ok(StoredObject {
            id: object_name.to_string(),
            name: object_name.to_string(),
            web_view_link: None,
        })
    }

    async fn delete(&self, object_id: &str) -> StorageResult<()> {
        let target = self.object_path(object_id)?;
        match fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(object_id.to_string()))
            }
            Err(e) => Err(StorageError::DeleteFailed(e.to_string())),
        }
    }
}
