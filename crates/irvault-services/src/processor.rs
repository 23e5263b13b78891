//! Document processor notification.
//!
//! One-way multipart submission of a staged file to the external processing
//! endpoint. Nothing beyond network-level success is interpreted; results
//! arrive asynchronously in the warehouse's `data_extracts` table.

use async_trait::async_trait;
use irvault_core::AppError;
use std::path::Path;
use std::time::Duration;

#[async_trait]
pub trait ProcessorNotifier: Send + Sync {
    /// Submit a staged file under `file_name`. Callers treat failure as
    /// non-fatal; there is no retry.
    async fn submit(&self, local_path: &Path, file_name: &str) -> Result<(), AppError>;
}

pub struct HttpProcessorNotifier {
    client: reqwest::Client,
    url: String,
}

impl HttpProcessorNotifier {
    pub fn new(url: String, timeout_secs: u64) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Notify(format!("Failed to create notifier client: {}", e)))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl ProcessorNotifier for HttpProcessorNotifier {
    async fn submit(&self, local_path: &Path, file_name: &str) -> Result<(), AppError> {
        let content = tokio::fs::read(local_path)
            .await
            .map_err(|e| AppError::Notify(format!("{}: {}", local_path.display(), e)))?;

        let part = reqwest::multipart::Part::bytes(content).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Notify(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Notify(format!("processor returned {}", status)));
        }

        tracing::debug!(file_name = %file_name, "Submitted to document processor");
        Ok(())
    }
}
