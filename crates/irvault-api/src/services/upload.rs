//! Upload pipeline.
//!
//! The per-file sequence behind both upload endpoints: stage to the temp
//! directory, record metadata, upload to storage, notify the document
//! processor, clean up. Each step returns an explicit result and the
//! pipeline decides per step whether a failure aborts the request or is
//! logged and carried on:
//!
//! - metadata recording is non-fatal (the row is lost, the upload proceeds),
//! - the storage upload is fatal and leaves the staged file behind,
//! - processor notification is non-fatal and never retried,
//! - cleanup is best-effort and reported as free text.

use crate::state::AppState;
use irvault_core::filename::{deduplicate_filename, sanitize_filename};
use irvault_core::models::NewUpload;
use irvault_core::AppError;
use std::path::PathBuf;

/// What happened to one file.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Name of the object as stored, echoed back to the caller.
    pub object_name: String,
    /// Free-text result of the temp file deletion.
    pub cleanup_status: String,
}

pub struct UploadPipeline<'a> {
    state: &'a AppState,
}

impl<'a> UploadPipeline<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Run the full sequence for one file. `ir_type` and `ir_description`
    /// are empty for bulk uploads.
    pub async fn process_file(
        &self,
        original_filename: &str,
        content: &[u8],
        ir_type: &str,
        ir_description: &str,
        uploaded_by: &str,
    ) -> Result<PipelineOutcome, AppError> {
        let new_name = sanitize_filename(&deduplicate_filename(original_filename));
        if new_name.is_empty() {
            return Err(AppError::InvalidInput(
                "Filename has no storable characters.".to_string(),
            ));
        }

        let staged = self.stage(&new_name, content).await?;

        // Step: record metadata. A failure here is logged and the upload
        // proceeds without the warehouse row.
        match self
            .state
            .ledger
            .record_upload(&NewUpload {
                file_original_name: original_filename.to_string(),
                file_new_name: new_name.clone(),
                ir_type: ir_type.to_string(),
                ir_description: ir_description.to_string(),
                uploaded_by: uploaded_by.to_string(),
            })
            .await
        {
            Ok(record) => {
                tracing::info!(file_id = %record.file_id, file_new_name = %new_name, "Upload metadata recorded");
            }
            Err(e) => {
                tracing::warn!(error = %e, file_new_name = %new_name, "Failed to record upload metadata; continuing");
            }
        }

        // Step: storage upload. Fatal; the staged file stays behind here.
        let object = self
            .state
            .storage
            .upload_file(&staged, &new_name)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        // Step: notify the document processor. Fire-and-forget.
        if let Err(e) = self.state.notifier.submit(&staged, &new_name).await {
            tracing::warn!(error = %e, file_new_name = %new_name, "Document processor notification failed");
        }

        let cleanup_status = self.cleanup(&staged).await;

        Ok(PipelineOutcome {
            object_name: object.name,
            cleanup_status,
        })
    }

    async fn stage(&self, new_name: &str, content: &[u8]) -> Result<PathBuf, AppError> {
        let staged = self.state.config.temp_folder.join(new_name);
        tokio::fs::write(&staged, content).await.map_err(|e| {
            AppError::Internal(format!("Failed to stage {}: {}", staged.display(), e))
        })?;
        Ok(staged)
    }

    async fn cleanup(&self, staged: &PathBuf) -> String {
        match tokio::fs::remove_file(staged).await {
            Ok(()) => {
                tracing::info!(path = %staged.display(), "Deleted staged file");
                format!("Deleted: {}", staged.display())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %staged.display(), "Staged file already gone");
                format!("File not found for cleanup: {}", staged.display())
            }
            Err(e) => {
                tracing::warn!(path = %staged.display(), error = %e, "Cleanup failed");
                format!("Cleanup failed: {}", e)
            }
        }
    }
}
