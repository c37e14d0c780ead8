pub mod cli;
pub mod config;
pub mod configmap;
pub mod uploader;
pub mod utils;
pub mod vault;

pub use config::{ConfigOverrides, Configuration};
pub use configmap::KeyValueSet;
pub use uploader::{ConfigMapUploader, UploadOutcome};
pub use utils::errors::{Result, UploaderError};
pub use vault::{SecretStore, VaultCli, VaultClient};
