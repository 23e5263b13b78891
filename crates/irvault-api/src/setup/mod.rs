//! Application setup and initialization
//!
//! Everything here runs once at startup: temp directory creation, database
//! pool and migrations, credential resolution, and construction of the
//! shared `AppState`. Collaborators are built eagerly so misconfiguration
//! fails at boot rather than on the first request.

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use irvault_core::Config;
use irvault_db::WarehouseLedger;
use irvault_services::{
    EnvSecretProvider, HttpProcessorNotifier, SecretManagerClient, SecretProvider,
    ServiceCredentials,
};
use irvault_storage::DriveStorage;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    tokio::fs::create_dir_all(&config.temp_folder)
        .await
        .with_context(|| {
            format!(
                "Failed to create temp folder {}",
                config.temp_folder.display()
            )
        })?;

    let pool = database::setup_database(&config).await?;

    // These secret ids authenticate per-role warehouse clients upstream;
    // the sqlx pool replaces them here, so only note their absence.
    for (name, value) in [
        ("BQ_DATA_WRITER", &config.writer_secret_id),
        ("BQ_DATA_READER", &config.reader_secret_id),
        ("API_SECRET_ID_FROM_SECRET_MANAGER", &config.api_secret_id),
    ] {
        if value.is_none() {
            tracing::debug!(secret = name, "Secret id not configured; using DATABASE_URL");
        }
    }

    let secrets: Arc<dyn SecretProvider> = match &config.secret_manager_token {
        Some(token) => Arc::new(SecretManagerClient::new(
            config.project_name.clone(),
            token.clone(),
            config.outbound_timeout_secs,
        )?),
        None => {
            tracing::warn!("SECRET_MANAGER_TOKEN not set; resolving secrets from the environment");
            Arc::new(EnvSecretProvider)
        }
    };

    let payload = secrets
        .access_secret(&config.drive_secret_id)
        .await
        .context("Failed to resolve drive credentials")?;
    let credentials = ServiceCredentials::from_secret_payload(&payload)?;
    tracing::info!(
        scope = ?config.drive_scope,
        project = ?credentials.project_id,
        "Drive credentials resolved"
    );

    let storage = Arc::new(DriveStorage::new(
        config.upload_folder_id.clone(),
        credentials.token,
        config.outbound_timeout_secs,
    )?);

    let notifier = Arc::new(HttpProcessorNotifier::new(
        config.processor_url.clone(),
        config.outbound_timeout_secs,
    )?);

    let ledger = Arc::new(WarehouseLedger::new(pool, config.api_key_table.clone()));

    let state = Arc::new(AppState::new(config, ledger, storage, notifier));
    let router = routes::build_router(state.clone());

    Ok((state, router))
}
