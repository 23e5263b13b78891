//! Bulk upload endpoint.
//!
//! Files are processed sequentially in submission order. The first fatal
//! error aborts the loop and the caller gets the generic failure response
//! with no indication of which files, if any, completed; earlier files may
//! already be stored and recorded.

use crate::services::UploadPipeline;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use irvault_core::AppError;
use serde_json::json;
use std::sync::Arc;

/// POST /upload_bulk_to_gdrive
///
/// Multipart fields: `bulk_file` (repeated), `uploaded_by`.
pub async fn upload_bulk(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    match handle(&state, multipart).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Bulk upload failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "failed"})),
            )
                .into_response()
        }
    }
}

async fn handle(state: &AppState, mut multipart: Multipart) -> Result<Response, AppError> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    let mut uploaded_by = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "bulk_file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
                files.push((filename, bytes.to_vec()));
            }
            "uploaded_by" => {
                uploaded_by = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No file part in the request."})),
        )
            .into_response());
    }

    tracing::info!(count = files.len(), uploaded_by = %uploaded_by, "Starting bulk upload");

    let pipeline = UploadPipeline::new(state);
    for (original_filename, content) in &files {
        // Bulk rows carry no classification fields.
        pipeline
            .process_file(original_filename, content, "", "", &uploaded_by)
            .await?;
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Upload complete.",
            "status": "success",
        })),
    )
        .into_response())
}
