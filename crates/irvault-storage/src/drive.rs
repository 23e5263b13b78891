//! Drive-style storage backend.
//!
//! Uploads go to the drive API's multipart endpoint: one `multipart/related`
//! body carrying the object metadata (name + parent folder) and the file
//! content. The body is assembled by hand because `reqwest::multipart`
//! produces `multipart/form-data`, which the drive endpoint rejects.

use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

const DRIVE_UPLOAD_URL: &str =
    "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart&supportsAllDrives=true&fields=id,name,webViewLink";
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

#[derive(Debug, Deserialize)]
struct DriveFileResponse {
    id: String,
    name: String,
    #[serde(rename = "webViewLink")]
    web_view_link: Option<String>,
}

/// Storage backend over the drive HTTP API.
///
/// One instance is built at startup with credentials resolved from the
/// secret provider; `reqwest::Client` is documented safe for concurrent use.
pub struct DriveStorage {
    client: reqwest::Client,
    upload_url: String,
    files_url: String,
    folder_id: String,
    token: String,
}

impl DriveStorage {
    pub fn new(folder_id: String, token: String, timeout_secs: u64) -> StorageResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                StorageError::ConfigError(format!("Failed to create drive HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            upload_url: DRIVE_UPLOAD_URL.to_string(),
            files_url: DRIVE_FILES_URL.to_string(),
            folder_id,
            token,
        })
    }

    /// Override endpoints, for tests against a stub server.
    pub fn with_endpoints(mut self, upload_url: String, files_url: String) -> Self {
        self.upload_url = upload_url;
        self.files_url = files_url;
        self
    }

    fn build_related_body(
        &self,
        object_name: &str,
        content: &[u8],
        boundary: &str,
    ) -> StorageResult<Vec<u8>> {
        let metadata = serde_json::json!({
            "name": object_name,
            "parents": [self.folder_id],
        });

        let mut body = Vec::with_capacity(content.len() + 512);
        write!(
            body,
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n\
             --{boundary}\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .map_err(|e| StorageError::UploadFailed(format!("Failed to assemble body: {}", e)))?;
        body.extend_from_slice(content);
        write!(body, "\r\n--{boundary}--\r\n")
            .map_err(|e| StorageError::UploadFailed(format!("Failed to assemble body: {}", e)))?;
        Ok(body)
    }
}

#[async_trait]
impl Storage for DriveStorage {
    async fn upload_file(
        &self,
        local_path: &Path,
        object_name: &str,
    ) -> StorageResult<StoredObject> {
        let content = tokio::fs::read(local_path).await.map_err(|e| {
            StorageError::NotFound(format!("{}: {}", local_path.display(), e))
        })?;

        let boundary = format!("irvault-{}", Uuid::new_v4());
        let body = self.build_related_body(object_name, &content, &boundary)?;

        let response = self
            .client
            .post(&self.upload_url)
            .bearer_auth(&self.token)
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StorageError::UploadFailed(format!(
                "drive returned {}: {}",
                status, text
            )));
        }

        let file: DriveFileResponse = response
            .json()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("invalid drive response: {}", e)))?;

        tracing::debug!(object_id = %file.id, object_name = %file.name, "Uploaded to drive");

        Ok(StoredObject {
            id: file.id,
            name: file.name,
            web_view_link: file.web_view_link,
        })
    }

    async fn delete(&self, object_id: &str) -> StorageResult<()> {
        let url = format!("{}/{}?supportsAllDrives=true", self.files_url, object_id);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StorageError::DeleteFailed(format!(
                "drive returned {}: {}",
                status, text
            )));
        }
        Ok(())
    }
}
