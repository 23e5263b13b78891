//! API key middleware.
//!
//! Every route requires `X-API-Key`. Missing, empty, and unknown keys are
//! indistinguishable to the caller: all yield 401 with the fixed payload,
//! before any handler (and therefore any side effect) runs. The allow-list
//! is re-queried on every request; there is no caching or rate limiting.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

const API_KEY_HEADER: &str = "x-api-key";

pub fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "status": "error",
            "message": "Unauthorized. Invalid API key."
        })),
    )
        .into_response()
}

pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if key.is_empty() {
        return unauthorized_response();
    }

    match state.ledger.is_valid_api_key(key).await {
        Ok(true) => next.run(request).await,
        Ok(false) => unauthorized_response(),
        Err(e) => {
            // Allow-list lookup itself failed; surface as a server error
            // rather than silently denying.
            HttpAppError(e).into_response()
        }
    }
}
