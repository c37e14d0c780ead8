use configmap_vault::cli::{handle_command, Cli};
use configmap_vault::utils::errors::{Result, UploaderError};

#[tokio::main]
async fn main() -> Result<()> {
    use clap::Parser;
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --version goes to stdout and succeeds; every usage error exits 1
            e.print()?;
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    match handle_command(cli).await {
        Ok(()) => {}
        // usage is already on stderr
        Err(UploaderError::UsageRequested) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
