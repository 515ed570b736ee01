//! Command-line surface: argument parsing, setup commands and the TUI launcher

pub mod app;
pub mod commands;
pub mod services;
pub mod ui;

pub use app::{Cli, Commands};
pub use services::Services;
