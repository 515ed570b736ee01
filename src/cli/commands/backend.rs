//! Backend connection settings

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use dialoguer::{Input, Password};

use crate::api::BackendConfig;
use crate::config::Config;
use crate::config::models::env;

#[derive(Args)]
pub struct BackendCommands {
    #[command(subcommand)]
    pub command: BackendSubcommands,
}

#[derive(Subcommand)]
pub enum BackendSubcommands {
    /// Store the backend URL and anon key (prompts for missing values)
    Set {
        /// Project URL, e.g. https://xyz.supabase.co
        #[arg(long)]
        url: Option<String>,
        /// Public anon key
        #[arg(long)]
        anon_key: Option<String>,
    },
    /// Show the stored and effective backend settings
    Show,
    /// Remove the stored settings and the persisted session
    Clear,
}

pub async fn backend_command(args: BackendCommands, config: &Config) -> Result<()> {
    match args.command {
        BackendSubcommands::Set { url, anon_key } => set_command(config, url, anon_key).await,
        BackendSubcommands::Show => show_command(config).await,
        BackendSubcommands::Clear => {
            config.clear_backend().await?;
            println!("  {}", "✓ Backend settings removed".bright_green().bold());
            Ok(())
        }
    }
}

async fn set_command(config: &Config, url: Option<String>, anon_key: Option<String>) -> Result<()> {
    let url = match url {
        Some(url) => url,
        None => Input::new().with_prompt("Backend URL").interact_text()?,
    };
    let anon_key = match anon_key {
        Some(key) => key,
        None => Password::new().with_prompt("Anon key").interact()?,
    };

    config.set_backend(&BackendConfig::new(url, anon_key)).await?;

    println!("  {}", "✓ Backend settings saved".bright_green().bold());
    println!("    {}: {}", "Config".dimmed(), config.db_path().display().to_string().cyan());
    Ok(())
}

/// First and last four characters of a key
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

async fn show_command(config: &Config) -> Result<()> {
    println!();
    println!("  {}", "HSE-IT Risk backend".bright_blue().bold());
    println!("  {}", "═══════════════════".bright_blue());

    match config.stored_backend().await? {
        Some(stored) => {
            println!("  {}", "Stored:".bright_white().bold());
            println!("    {}: {}", "URL".dimmed(), stored.url.cyan());
            println!("    {}: {}", "Anon key".dimmed(), mask_key(&stored.anon_key).bright_yellow());
        }
        None => {
            println!("  {}", "⚠️  No backend stored".bright_yellow().bold());
            println!("  {}", "Run 'hseit-risk backend set' to configure one.".dimmed());
        }
    }

    let overridden = [env::BACKEND_URL, env::ANON_KEY]
        .iter()
        .filter(|name| std::env::var(name).is_ok_and(|v| !v.trim().is_empty()))
        .copied()
        .collect::<Vec<_>>();
    if !overridden.is_empty() {
        println!();
        println!("  {} {}", "Overridden by environment:".bright_white().bold(), overridden.join(", ").cyan());
    }

    if let Some(effective) = config.backend().await? {
        println!();
        println!("  {} {}", "Effective URL:".bright_white().bold(), effective.url.bright_green());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abc"), "***");
        assert_eq!(mask_key("eyJhbGciOiJIUzI1NiJ9"), "eyJh…NiJ9");
    }

    #[tokio::test]
    async fn test_set_with_flags_persists() {
        let config = Config::new_test().await.unwrap();
        set_command(&config, Some("https://abc.supabase.co/".into()), Some("anon".into()))
            .await
            .unwrap();
        assert_eq!(
            config.stored_backend().await.unwrap(),
            Some(BackendConfig::new("https://abc.supabase.co", "anon"))
        );
    }
}
