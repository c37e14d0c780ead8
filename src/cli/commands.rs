use crate::cli::args::Cli;
use crate::config::Configuration;
use crate::uploader::{ConfigMapUploader, UploadOutcome};
use crate::utils::errors::{Result, UploaderError};
use crate::utils::output::OutputFormat;
use crate::vault::VaultCli;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

pub async fn handle_command(cli: Cli) -> Result<()> {
    if cli.help {
        print_usage()?;
        return Err(UploaderError::UsageRequested);
    }

    // Initialize logging - always to stderr
    let log_level = match cli.verbose {
        0 => "configmap_vault=warn",  // Default: warnings only
        1 => "configmap_vault=info",  // -v: info level
        2 => "configmap_vault=debug", // -vv: debug level
        _ => "configmap_vault=trace", // -vvv+: trace level
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_level)
        .init();

    if let Some(shell) = cli.completions {
        handle_completion_command(shell);
        return Ok(());
    }

    let config = match Configuration::resolve_interactive(cli.overrides()) {
        Ok(config) => config,
        Err(e @ UploaderError::MissingConfiguration(_)) => {
            print_usage()?;
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    let store = VaultCli::new(&config.vault_url);
    let mut uploader =
        ConfigMapUploader::new(config, store, OutputFormat::stdout()).dry_run(cli.dry_run);

    match uploader.run().await? {
        UploadOutcome::Uploaded { keys } => tracing::info!("Upload complete ({keys} keys)"),
        UploadOutcome::DryRun { keys } => tracing::info!("Dry run complete ({keys} keys)"),
        UploadOutcome::NoData => tracing::info!("Nothing uploaded"),
    }
    Ok(())
}

fn print_usage() -> Result<()> {
    let mut stderr = io::stderr();
    Cli::command().write_help(&mut stderr)?;
    Ok(())
}

fn handle_completion_command(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "configmap-vault", &mut io::stdout());
}
