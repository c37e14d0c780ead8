use crate::config::Configuration;
use crate::configmap::{self, KeyValueSet};
use crate::utils::errors::Result;
use crate::utils::output::OutputFormat;
use crate::vault::{SecretStore, VaultClient};
use std::io::Write;

/// How a run that did not fail ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The ConfigMap had nothing under `data`
    NoData,
    /// Everything up to the write ran; the write was skipped
    DryRun { keys: usize },
    Uploaded { keys: usize },
}

/// Moves one ConfigMap's `data` into a Vault KV path
pub struct ConfigMapUploader<S: SecretStore, W: Write> {
    config: Configuration,
    store: S,
    output: OutputFormat<W>,
    dry_run: bool,
}

impl<S: SecretStore, W: Write> ConfigMapUploader<S, W> {
    pub fn new(config: Configuration, store: S, output: OutputFormat<W>) -> Self {
        Self {
            config,
            store,
            output,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_output(self) -> OutputFormat<W> {
        self.output
    }

    /// Validate, summarize, check health, parse, then write.
    ///
    /// Every step is fatal on failure except the health check.
    pub async fn run(&mut self) -> Result<UploadOutcome> {
        self.config.validate_file()?;
        self.show_summary()?;
        self.check_health().await?;

        let Some(data) = configmap::load_data(&self.config.configmap_file)? else {
            self.output.line(format!(
                "No data found in {}; nothing to upload.",
                self.config.configmap_file.display()
            ))?;
            return Ok(UploadOutcome::NoData);
        };

        if self.dry_run {
            return self.show_dry_run(&data);
        }
        self.upload(&data)
    }

    fn show_summary(&mut self) -> Result<()> {
        self.output.line("Uploading ConfigMap data to Vault")?;
        self.output.print_key_value(&self.config.summary())?;
        Ok(())
    }

    /// Best-effort connectivity check; only output errors escape
    async fn check_health(&mut self) -> Result<()> {
        let client = match VaultClient::new(&self.config.vault_url) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Skipping Vault health check: {e}");
                return Ok(());
            }
        };

        match client.health().await {
            Ok(status) => {
                tracing::info!(
                    "Vault health: initialized={} sealed={} standby={}",
                    status.initialized,
                    status.sealed,
                    status.standby
                );
                match status.version {
                    Some(version) => self
                        .output
                        .line(format!("✓ Vault is reachable (version {version})"))?,
                    None => self.output.line("✓ Vault is reachable")?,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Cannot reach Vault at {}: {e}. Continuing anyway.",
                    client.health_url()
                );
            }
        }
        Ok(())
    }

    fn show_dry_run(&mut self, data: &KeyValueSet) -> Result<UploadOutcome> {
        self.output.line(format!(
            "Dry run: would write {} keys to {}",
            data.len(),
            self.config.vault_path
        ))?;
        self.output
            .line(format!("vault kv put {} {data}", self.config.vault_path))?;
        Ok(UploadOutcome::DryRun { keys: data.len() })
    }

    fn upload(&mut self, data: &KeyValueSet) -> Result<UploadOutcome> {
        tracing::info!(
            "Writing {} keys to {}: {}",
            data.len(),
            self.config.vault_path,
            data.iter().map(|(k, _)| k).collect::<Vec<_>>().join(", ")
        );

        self.store.kv_put(&self.config.vault_path, data)?;

        self.output.line(format!(
            "✓ Uploaded {} keys to {}",
            data.len(),
            self.config.vault_path
        ))?;
        self.output.line(format!(
            "Verify with: vault kv get {}",
            self.config.vault_path
        ))?;
        Ok(UploadOutcome::Uploaded { keys: data.len() })
    }
}
