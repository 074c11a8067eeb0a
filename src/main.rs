//! Todey CLI entrypoint: scan a pull request for `# TODO!:` annotations.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use todey::{TodeyConfig, TodeyError};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "scan failed");
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), TodeyError> {
    let config = load_config()?;
    cli::scan::run(&config).await
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`TodeyError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<TodeyConfig, TodeyError> {
    TodeyConfig::load().map_err(|error| TodeyError::Configuration {
        message: error.to_string(),
    })
}
