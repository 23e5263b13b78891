//! Route table.

use crate::auth::require_api_key;
use crate::handlers::{
    master_data::get_app_master_data, upload_bulk::upload_bulk, upload_ir::upload_ir,
};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, middleware, routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Uploads are buffered in memory before staging; cap the request body.
const MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/upload_ir", post(upload_ir))
        .route("/upload_bulk_to_gdrive", post(upload_bulk))
        .route("/get_app_master_data", post(get_app_master_data))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
