use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sm_core::config::AppConfig;
use sm_shell::bootstrap::tracing::init_tracing_subscriber;
use sm_shell::bootstrap::wiring::system_data_dir;
use sm_shell::bootstrap::{load_config, run_console, wire_runtime, ResolvedSettings};
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser)]
#[command(name = "suivi-medical")]
#[command(about = "Suivi médical pour patients diabétiques", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path.clone())?,
        None => AppConfig::with_system_defaults(system_data_dir()),
    };
    let settings = ResolvedSettings::resolve(&config, system_data_dir())?;

    init_tracing_subscriber(&settings.logs_dir).context("Failed to initialize tracing")?;
    info!(
        data_dir = %settings.data_dir.display(),
        provider = ?settings.identity,
        "starting suivi-medical"
    );

    let runtime = wire_runtime(&settings)?;
    run_console(
        &runtime,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
