use super::commands::backend::BackendCommands;
use super::commands::session::SessionCommands;
use super::commands::tui::TuiCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hseit-risk")]
#[command(about = "Terminal client for the HSE-IT psychosocial risk survey")]
#[command(version)]
pub struct Cli {
    /// Defaults to launching the TUI
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive TUI
    Tui(TuiCommands),
    /// Backend connection settings
    Backend(BackendCommands),
    /// Inspect or manage the persisted session
    Session(SessionCommands),
}
