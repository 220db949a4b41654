use clap::Parser;
use tracing_subscriber::EnvFilter;

use paperkey::commands::{execute_command, Commands};
use paperkey::constants::DEFAULT_CURRENCY;
use paperkey::network::Network;
use paperkey::types::Settings;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), about = env!("CARGO_PKG_DESCRIPTION"), author = env!("CARGO_PKG_AUTHORS"), version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[arg(long, global = true, env = "PAPERKEY_CURRENCY", default_value = DEFAULT_CURRENCY, help = "Currency used to read and write keys and addresses")]
    currency: String,
    #[arg(long, global = true, env = "PAPERKEY_LOG", default_value = "warn", help = "Log filter written to stderr (RUST_LOG takes precedence)")]
    log_level: String,
    #[arg(long, global = true, help = "Print results as JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    let network = Network::select(&cli.currency)?;
    tracing::debug!(currency = network.name, "selected currency");
    let settings = Settings { network, json: cli.json };
    execute_command(cli.command, &settings)?;
    Ok(())
}
