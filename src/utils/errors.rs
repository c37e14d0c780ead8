use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploaderError {
    /// `-h` was given; usage has already been printed
    #[error("usage requested")]
    UsageRequested,

    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingConfiguration(Vec<&'static str>),

    #[error("ConfigMap file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to upload to Vault: {0}")]
    UploadFailed(String),

    #[error("Invalid ConfigMap: {0}")]
    ConfigMap(String),

    #[error("Vault CLI error: {0}")]
    VaultCli(String),

    #[error("Vault API error: {0}")]
    VaultApi(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, UploaderError>;
