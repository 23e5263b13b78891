//! Master data endpoint: latest upload per original filename for one user,
//! joined with any extraction result.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct MasterDataRequest {
    #[serde(default)]
    user: Option<String>,
}

/// POST /get_app_master_data
///
/// Body: `{"user": <name>}`. Returns a JSON array of flat rows, or
/// `{"message": "No data found"}` (still 200) when the user has no uploads.
pub async fn get_app_master_data(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MasterDataRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": rejection.body_text()})),
            )
                .into_response();
        }
    };

    let user = match request.user.as_deref() {
        Some(user) if !user.is_empty() => user,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "No user provided."})),
            )
                .into_response();
        }
    };

    match state.ledger.master_data(user).await {
        Ok(rows) if rows.is_empty() => {
            (StatusCode::OK, Json(json!({"message": "No data found"}))).into_response()
        }
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => HttpAppError(e).into_response(),
    }
}
