//! SQLite-backed local configuration
//!
//! Stores the backend connection settings and the persisted session. The
//! remote survey tables are never touched from here.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub mod db;
pub mod migrations;
pub mod models;
pub mod repository;

use crate::api::BackendConfig;
use crate::auth::{SessionStore, StoredSession};
use models::keys;

#[derive(Clone)]
pub struct Config {
    pub(crate) pool: sqlx::SqlitePool,
    db_path: PathBuf,
}

impl Config {
    /// Path of the database file, creating its directory if needed
    pub fn get_db_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("hseit-risk");

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            log::info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.db"))
    }

    pub async fn load() -> Result<Self> {
        let db_path = Self::get_db_path()?;
        Self::open(&db_path).await
    }

    /// Open (and migrate) the database at an explicit path
    pub async fn open(db_path: &Path) -> Result<Self> {
        log::debug!("Loading config from: {:?}", db_path);
        let pool = db::connect(db_path).await?;
        db::run_migrations(&pool).await?;

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    /// In-memory database for tests
    pub async fn new_test() -> Result<Self> {
        let pool = db::connect_memory().await?;
        db::run_migrations(&pool).await?;

        Ok(Self {
            pool,
            db_path: PathBuf::from(":memory:"),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        repository::settings::get(&self.pool, key).await
    }

    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        repository::settings::set(&self.pool, key, value).await
    }

    /// Backend settings as stored, without environment overrides
    pub async fn stored_backend(&self) -> Result<Option<BackendConfig>> {
        let url = self.get_setting(keys::BACKEND_URL).await?;
        let anon_key = self.get_setting(keys::ANON_KEY).await?;
        Ok(url.zip(anon_key).map(|(url, key)| BackendConfig::new(url, key)))
    }

    /// Effective backend settings: environment variables win over stored values
    pub async fn backend(&self) -> Result<Option<BackendConfig>> {
        let url = self.get_setting(keys::BACKEND_URL).await?;
        let anon_key = self.get_setting(keys::ANON_KEY).await?;
        Ok(resolve_backend(
            url,
            anon_key,
            std::env::var(models::env::BACKEND_URL).ok(),
            std::env::var(models::env::ANON_KEY).ok(),
        ))
    }

    pub async fn set_backend(&self, backend: &BackendConfig) -> Result<()> {
        let url = backend.url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("Backend URL must start with http:// or https://, got '{}'", backend.url);
        }
        if backend.anon_key.trim().is_empty() {
            anyhow::bail!("Anon key must not be empty");
        }

        self.set_setting(keys::BACKEND_URL, url).await?;
        self.set_setting(keys::ANON_KEY, backend.anon_key.trim()).await?;
        log::info!("Saved backend settings for {}", url);
        Ok(())
    }

    /// Forget the stored backend and the session that belonged to it
    pub async fn clear_backend(&self) -> Result<()> {
        repository::settings::delete(&self.pool, keys::BACKEND_URL).await?;
        repository::settings::delete(&self.pool, keys::ANON_KEY).await?;
        self.delete_session().await?;
        log::info!("Cleared backend settings");
        Ok(())
    }

    pub async fn save_session(&self, session: &StoredSession) -> Result<()> {
        repository::sessions::save(&self.pool, session).await
    }

    pub async fn get_session(&self) -> Result<Option<StoredSession>> {
        repository::sessions::get(&self.pool).await
    }

    pub async fn delete_session(&self) -> Result<()> {
        repository::sessions::delete(&self.pool).await
    }
}

/// Merge stored values with overrides; a blank override is ignored
pub fn resolve_backend(
    stored_url: Option<String>,
    stored_key: Option<String>,
    env_url: Option<String>,
    env_key: Option<String>,
) -> Option<BackendConfig> {
    let pick = |env: Option<String>, stored: Option<String>| {
        env.filter(|v| !v.trim().is_empty())
            .or(stored)
            .map(|v| v.trim().to_string())
    };
    let url = pick(env_url, stored_url)?;
    let key = pick(env_key, stored_key)?;
    Some(BackendConfig::new(url, key))
}

#[async_trait]
impl SessionStore for Config {
    async fn load_session(&self) -> Result<Option<StoredSession>> {
        self.get_session().await
    }

    async fn save_session(&self, session: &StoredSession) -> Result<()> {
        Config::save_session(self, session).await
    }

    async fn clear_session(&self) -> Result<()> {
        self.delete_session().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_backend_precedence() {
        let stored = resolve_backend(Some("https://a.example".into()), Some("k1".into()), None, None);
        assert_eq!(stored, Some(BackendConfig::new("https://a.example", "k1")));

        let overridden = resolve_backend(
            Some("https://a.example".into()),
            Some("k1".into()),
            Some("https://b.example".into()),
            Some("  ".into()),
        );
        assert_eq!(overridden, Some(BackendConfig::new("https://b.example", "k1")));

        assert_eq!(resolve_backend(None, Some("k1".into()), None, None), None);
    }

    #[tokio::test]
    async fn test_backend_validation() {
        let config = Config::new_test().await.unwrap();
        assert!(config.set_backend(&BackendConfig::new("ftp://x", "k")).await.is_err());
        assert!(config.set_backend(&BackendConfig::new("https://x.example", " ")).await.is_err());

        config
            .set_backend(&BackendConfig::new("https://x.example/", "anon"))
            .await
            .unwrap();
        assert_eq!(
            config.stored_backend().await.unwrap(),
            Some(BackendConfig::new("https://x.example", "anon"))
        );

        config.clear_backend().await.unwrap();
        assert_eq!(config.stored_backend().await.unwrap(), None);
    }
}
