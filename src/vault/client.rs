use crate::utils::errors::Result;
use reqwest::Client;
use serde::Deserialize;

/// Subset of the `sys/health` response worth reporting
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub sealed: bool,
    #[serde(default)]
    pub standby: bool,
    #[serde(default)]
    pub version: Option<String>,
}

pub struct VaultClient {
    client: Client,
    vault_addr: String,
}

impl VaultClient {
    pub fn new(vault_addr: &str) -> Result<Self> {
        let client = super::create_http_client(super::HEALTH_TIMEOUT)?;

        Ok(Self {
            client,
            vault_addr: vault_addr.trim_end_matches('/').to_string(),
        })
    }

    /// Get vault address
    pub fn vault_addr(&self) -> &str {
        &self.vault_addr
    }

    pub fn health_url(&self) -> String {
        format!("{}/v1/sys/health", self.vault_addr)
    }

    /// Health check. Any non-2xx answer (sealed, standby, uninitialized) is an error.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.health_url();
        tracing::debug!("Probing {url}");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        tracing::debug!("Health response status: {}", response.status());

        Ok(response.json().await?)
    }
}
