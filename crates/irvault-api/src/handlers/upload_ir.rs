//! Single-file upload endpoint.

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

/// POST /upload_ir
///
/// Multipart fields: `file`, `ir_type`, `ir_description`, `uploaded_by`.
/// 200: `{"message": <stored object name>, "cleanup_status": <text>}`.
/// Anything unexpected becomes a 500 carrying the error's display text.
pub async fn upload_ir(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    match handle(&state, multipart).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Error uploading file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": format!("Error uploading file: {}", e)})),
            )
                .into_response()
        }
    }
}

async fn handle(state: &AppState, mut multipart: Multipart) -> Result<Response, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut ir_type = String::new();
    let mut ir_description = String::new();
    let mut uploaded_by = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
                file = Some((filename, bytes.to_vec()));
            }
            "ir_type" => {
                ir_type = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
            }
            "ir_description" => {
                ir_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
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

    // Validation happens before anything touches the temp directory.
    let Some((original_filename, content)) = file else {
        return Ok(bad_request("No file part in the request."));
    };
    if original_filename.is_empty() {
        return Ok(bad_request("No file selected."));
    }

    let outcome = UploadPipeline::new(state)
        .process_file(
            &original_filename,
            &content,
            &ir_type,
            &ir_description,
            &uploaded_by,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": outcome.object_name,
            "cleanup_status": outcome.cleanup_status,
        })),
    )
        .into_response())
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({"error": message}))).into_response()
}
