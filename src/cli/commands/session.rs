//! Persisted session: status, login and logout outside the TUI

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use dialoguer::Input;

use crate::auth::credentials::validate_sign_in;
use crate::auth::{SessionState, lookup_role};
use crate::cli::Services;
use crate::cli::ui::with_spinner;
use crate::config::Config;

#[derive(Args)]
pub struct SessionCommands {
    #[command(subcommand)]
    pub command: SessionSubcommands,
}

#[derive(Subcommand)]
pub enum SessionSubcommands {
    /// Show who is signed in and their role
    Status,
    /// Sign in and keep the session for the next TUI launch
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Revoke and forget the stored session
    Logout,
}

pub async fn session_command(args: SessionCommands, config: &Config) -> Result<()> {
    let services = Services::connect(config).await?;
    let state = with_spinner("Restoring session...", services.session.init()).await;

    match args.command {
        SessionSubcommands::Status => status_command(&services, state).await,
        SessionSubcommands::Login { email } => login_command(&services, email).await,
        SessionSubcommands::Logout => logout_command(&services, state).await,
    }
}

async fn status_command(services: &Services, state: SessionState) -> Result<()> {
    println!();
    println!("  {}", "HSE-IT Risk session".bright_blue().bold());
    println!("  {}", "═══════════════════".bright_blue());

    let SessionState::SignedIn(session) = state else {
        println!("  {}", "⚠️  Not signed in".bright_yellow().bold());
        println!("  {}", "Run 'hseit-risk session login' or sign in from the TUI.".dimmed());
        return Ok(());
    };

    let role = with_spinner("Checking role...", lookup_role(services.client.as_ref(), &session.user.id)).await;
    println!("    {}: {}", "User".dimmed(), session.user.display_name().bright_white().bold());
    if let Some(email) = &session.user.email {
        println!("    {}: {}", "E-mail".dimmed(), email.cyan());
    }
    println!(
        "    {}: {}",
        "Role".dimmed(),
        role.role.as_deref().unwrap_or("participante").bright_yellow()
    );
    println!(
        "    {}: {}",
        "Expires".dimmed(),
        session.token.expires_at.format("%Y-%m-%d %H:%M UTC").to_string().white()
    );
    Ok(())
}

async fn login_command(services: &Services, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("E-mail").interact_text()?,
    };
    let password = rpassword::prompt_password("Senha: ").context("Failed to read password")?;
    validate_sign_in(&email, &password)?;

    let user = with_spinner("Signing in...", services.session.sign_in(&email, &password))
        .await
        .context("Erro ao entrar")?;

    println!(
        "  {} {}",
        "✓ Login realizado com sucesso!".bright_green().bold(),
        user.display_name().bright_white()
    );
    Ok(())
}

async fn logout_command(services: &Services, state: SessionState) -> Result<()> {
    if !matches!(state, SessionState::SignedIn(_)) {
        println!("  {}", "No active session".dimmed());
        return Ok(());
    }
    services.session.sign_out().await?;
    println!("  {}", "✓ Sessão encerrada".bright_green().bold());
    Ok(())
}
