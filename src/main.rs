use anyhow::Result;
use clap::Parser;
use log::info;

use hseit_risk::cli::commands::{TuiCommands, backend_command, session_command, tui_command};
use hseit_risk::cli::{Cli, Commands};
use hseit_risk::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; its values only feed the backend overrides
    let _ = dotenvy::dotenv();

    // Log to a file (truncated on each run) so the TUI is never disturbed
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("hseit-risk.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting hseit-risk {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().await?;

    match cli.command {
        None => tui_command(TuiCommands::default_launch(), &config).await?,
        Some(Commands::Tui(args)) => tui_command(args, &config).await?,
        Some(Commands::Backend(args)) => backend_command(args, &config).await?,
        Some(Commands::Session(args)) => session_command(args, &config).await?,
    }

    Ok(())
}
