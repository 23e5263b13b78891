//! Credential provider: resolves named secrets into service credentials.

use async_trait::async_trait;
use base64::Engine;
use irvault_core::AppError;
use serde::Deserialize;
use std::time::Duration;

const SECRET_MANAGER_BASE_URL: &str = "https://secretmanager.googleapis.com/v1";

/// Resolves a named secret into its latest payload.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    async fn access_secret(&self, secret_id: &str) -> Result<String, AppError>;
}

/// Structured credentials parsed from a secret payload.
///
/// The payload is the JSON blob operators store next to the service: a
/// bearer token for the drive API, plus the owning project when present.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCredentials {
    pub token: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl ServiceCredentials {
    pub fn from_secret_payload(payload: &str) -> Result<Self, AppError> {
        serde_json::from_str(payload)
            .map_err(|e| AppError::Secret(format!("Malformed credential payload: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct AccessSecretResponse {
    payload: SecretPayload,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    data: String,
}

/// Secret-manager REST client. Stateless; one instance per process.
pub struct SecretManagerClient {
    client: reqwest::Client,
    base_url: String,
    project: String,
    token: String,
}

impl SecretManagerClient {
    pub fn new(project: String, token: String, timeout_secs: u64) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                AppError::Secret(format!("Failed to create secret manager client: {}", e))
            })?;
        Ok(Self {
            client,
            base_url: SECRET_MANAGER_BASE_URL.to_string(),
            project,
            token,
        })
    }

    /// Override the endpoint, for tests against a stub server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl SecretProvider for SecretManagerClient {
    async fn access_secret(&self, secret_id: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/projects/{}/secrets/{}/versions/latest:access",
            self.base_url, self.project, secret_id
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| AppError::Secret(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Secret(format!(
                "secret manager returned {} for {}",
                status, secret_id
            )));
        }

        let body: AccessSecretResponse = response
            .json()
            .await
            .map_err(|e| AppError::Secret(format!("invalid secret response: {}", e)))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(body.payload.data)
            .map_err(|e| AppError::Secret(format!("secret payload is not base64: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| AppError::Secret(format!("secret payload is not UTF-8: {}", e)))
    }
}

/// Development fallback: secrets are read from the environment, keyed by
/// the secret id uppercased with dashes replaced by underscores.
pub struct EnvSecretProvider;

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn access_secret(&self, secret_id: &str) -> Result<String, AppError> {
        let var = secret_id.to_uppercase().replace('-', "_");
        std::env::var(&var).map_err(|_| {
            AppError::Secret(format!(
                "secret {} not found in environment (looked for {})",
                secret_id, var
            ))
        })
    }
}
