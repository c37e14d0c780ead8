pub mod client;
pub mod wrapper;

pub use client::{HealthStatus, VaultClient};
pub use wrapper::{KvPutCommand, SecretStore, VaultCli};

use reqwest::Client;
use std::time::Duration;

/// Upper bound for the health check; it must never hold up the upload for long
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a standardized HTTP client with security best practices
pub fn create_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .use_rustls_tls() // Use rustls with system certificate store
        .build()
}
