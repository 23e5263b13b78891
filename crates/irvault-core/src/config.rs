//! Configuration module
//!
//! Environment-driven configuration, loaded once at startup and shared
//! through the application state. The upstream service names
//! (`BQ_PROJECT_NAME`, `GDRIVE_FOLDER_SECRET_FROM_SECRET_MANAGER`, ...)
//! are kept as-is so existing deployments keep working.

use std::env;
use std::path::PathBuf;

const DEFAULT_SERVER_PORT: u16 = 5001;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_OUTBOUND_TIMEOUT_SECS: u64 = 60;
const DEFAULT_PROCESSOR_URL: &str =
    "https://us-west1-pgc-dma-dev-sandbox.cloudfunctions.net/cash-non-cash-gemini-test";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    /// Local staging directory for uploaded files; created at startup.
    pub temp_folder: PathBuf,
    /// Parent folder identifier in the drive-style storage service.
    pub upload_folder_id: String,
    /// Cloud project that owns the secrets.
    pub project_name: String,
    /// Secret id holding the drive service credentials.
    pub drive_secret_id: String,
    /// OAuth scope requested for the drive credentials.
    pub drive_scope: Option<String>,
    /// Secret ids for the warehouse writer/reader roles. The sqlx pool is
    /// authenticated via `DATABASE_URL` instead; these are recognized for
    /// deployment parity and only logged when absent.
    pub writer_secret_id: Option<String>,
    pub reader_secret_id: Option<String>,
    /// Secret id holding the API-key lookup credentials.
    pub api_secret_id: Option<String>,
    /// Table holding the API key allow-list.
    pub api_key_table: String,
    /// Document-processing endpoint receiving one-way multipart submissions.
    pub processor_url: String,
    /// Bearer token for the secret-manager REST endpoint.
    pub secret_manager_token: Option<String>,
    /// Timeout applied to every outbound HTTP call (storage, notifier,
    /// secrets). The original service had none; a hung upstream would block
    /// the request forever.
    pub outbound_timeout_secs: u64,
}

fn required(name: &str) -> Result<String, anyhow::Error> {
    env::var(name).map_err(|_| anyhow::anyhow!("Missing required environment variable {}", name))
}

fn parsed_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let api_key_table =
            env::var("API_PROJECT_TABLE_NAME").unwrap_or_else(|_| "api_keys".to_string());
        validate_table_name(&api_key_table)?;

        Ok(Config {
            server_port: parsed_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            database_url: required("DATABASE_URL")?,
            db_max_connections: parsed_or("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            db_timeout_seconds: parsed_or("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS),
            temp_folder: PathBuf::from(
                env::var("TEMP_FOLDER").unwrap_or_else(|_| "tmp_uploads".to_string()),
            ),
            upload_folder_id: required("UPLOAD_FOLDER_ID")?,
            project_name: required("BQ_PROJECT_NAME")?,
            drive_secret_id: required("GDRIVE_FOLDER_SECRET_FROM_SECRET_MANAGER")?,
            drive_scope: env::var("SCOPE").ok(),
            writer_secret_id: env::var("BQ_DATA_WRITER").ok(),
            reader_secret_id: env::var("BQ_DATA_READER").ok(),
            api_secret_id: env::var("API_SECRET_ID_FROM_SECRET_MANAGER").ok(),
            api_key_table,
            processor_url: env::var("PROCESSOR_URL")
                .unwrap_or_else(|_| DEFAULT_PROCESSOR_URL.to_string()),
            secret_manager_token: env::var("SECRET_MANAGER_TOKEN").ok(),
            outbound_timeout_secs: parsed_or(
                "OUTBOUND_TIMEOUT_SECS",
                DEFAULT_OUTBOUND_TIMEOUT_SECS,
            ),
        })
    }
}

/// The API key table name is interpolated into SQL (identifiers cannot be
/// bound), so restrict it to a safe identifier character set.
fn validate_table_name(name: &str) -> Result<(), anyhow::Error> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if ok {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "API_PROJECT_TABLE_NAME contains characters not allowed in an identifier: {}",
            name
        ))
    }
}
