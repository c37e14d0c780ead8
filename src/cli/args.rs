use crate::config::ConfigOverrides;
use clap::{ArgAction, Parser};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "configmap-vault")]
#[command(version = "1.0.0")]
#[command(about = "Upload the data section of a Kubernetes ConfigMap into Vault KV")]
#[command(
    long_about = "Upload the data section of a Kubernetes ConfigMap into Vault KV.\n\n\
Each setting is taken from its flag, then its environment variable \
(VAULT_URL, CONFIGMAP_FILE, VAULT_PATH), then an interactive prompt.\n\n\
Example: configmap-vault -u https://vault.example.com:8200 -c configmap.yaml -p secret/myapp"
)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Vault server URL
    #[arg(short = 'u', long, env = "VAULT_URL", value_name = "VAULT_URL")]
    pub vault_url: Option<String>,

    /// ConfigMap YAML file
    #[arg(
        short = 'c',
        long,
        env = "CONFIGMAP_FILE",
        value_name = "CONFIGMAP_FILE",
        value_hint = clap::ValueHint::FilePath
    )]
    pub configmap_file: Option<String>,

    /// Destination KV path, e.g. secret/myapp
    #[arg(short = 'p', long, env = "VAULT_PATH", value_name = "VAULT_PATH")]
    pub vault_path: Option<String>,

    /// Show what would be written without calling vault
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging (repeat for more verbosity: -v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Print usage
    #[arg(short = 'h', long, action = ArgAction::SetTrue)]
    pub help: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            vault_url: self.vault_url.clone(),
            configmap_file: self.configmap_file.clone(),
            vault_path: self.vault_path.clone(),
        }
    }
}
