use crate::configmap::KeyValueSet;
use crate::utils::errors::{Result, UploaderError};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Destination for the extracted key-value pairs
pub trait SecretStore {
    /// Replace everything stored at `path` with `data` in one write
    fn kv_put(&self, path: &str, data: &KeyValueSet) -> Result<()>;
}

/// Arguments (and optional stdin payload) for one `vault kv put`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvPutCommand {
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl KvPutCommand {
    /// Pass each pair as its own `key=value` argument.
    ///
    /// The vault CLI reads `@file` values from disk, strips the `\` from `\@`
    /// and reads a value of `-` from stdin. An argument that starts with `@`
    /// is read as a JSON file, so keys may not start with it. A leading `@` in
    /// a value is escaped; when a pair cannot be written losslessly as an
    /// argument, the whole set goes to stdin as a JSON object instead.
    pub fn build(path: &str, data: &KeyValueSet) -> Result<Self> {
        let mut args = vec!["kv".to_string(), "put".to_string(), path.to_string()];

        if data.iter().any(|(k, v)| !fits_argument(k, v)) {
            tracing::debug!("Passing key-value pairs to vault as JSON on stdin");
            args.push("-".to_string());
            return Ok(Self {
                args,
                stdin: Some(serde_json::to_string(&data.to_json())?),
            });
        }

        args.extend(data.iter().map(|(key, value)| {
            if value.starts_with('@') {
                format!("{key}=\\{value}")
            } else {
                format!("{key}={value}")
            }
        }));
        Ok(Self { args, stdin: None })
    }
}

fn fits_argument(key: &str, value: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('@')
        && !key.contains('=')
        && value != "-"
        && !value.starts_with("\\@")
}

/// Writes through the `vault` binary, leaving authentication to it
pub struct VaultCli {
    vault_exe: Option<PathBuf>,
    vault_addr: String,
}

impl VaultCli {
    /// Use whichever `vault` is on PATH at upload time
    pub fn new(vault_addr: &str) -> Self {
        Self {
            vault_exe: None,
            vault_addr: vault_addr.to_string(),
        }
    }

    pub fn with_executable(vault_exe: impl Into<PathBuf>, vault_addr: &str) -> Self {
        Self {
            vault_exe: Some(vault_exe.into()),
            vault_addr: vault_addr.to_string(),
        }
    }

    fn executable(&self) -> Result<PathBuf> {
        if let Some(exe) = &self.vault_exe {
            return Ok(exe.clone());
        }
        which::which("vault").map_err(|_| {
            UploaderError::VaultCli(
                "vault command not found in PATH. Please install HashiCorp Vault CLI.".to_string(),
            )
        })
    }
}

impl SecretStore for VaultCli {
    fn kv_put(&self, path: &str, data: &KeyValueSet) -> Result<()> {
        let command = KvPutCommand::build(path, data)?;

        // Inherit current environment but point the CLI at the resolved server
        let mut cmd = Command::new(self.executable()?);
        cmd.args(&command.args).env("VAULT_ADDR", &self.vault_addr);
        if command.stdin.is_some() {
            cmd.stdin(Stdio::piped());
        }

        tracing::debug!(
            "Executing: vault kv put {} ({} keys) with VAULT_ADDR={}",
            path,
            data.len(),
            self.vault_addr
        );

        let mut child = cmd.spawn().map_err(|e| {
            UploaderError::VaultCli(format!("Failed to execute vault command: {e}"))
        })?;

        if let (Some(payload), Some(mut stdin)) = (&command.stdin, child.stdin.take()) {
            match stdin.write_all(payload.as_bytes()) {
                // The exit status explains what went wrong
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(UploaderError::UploadFailed(match status.code() {
                Some(code) => format!("vault kv put exited with status {code}"),
                None => "vault kv put was terminated by a signal".to_string(),
            }))
        }
    }
}
