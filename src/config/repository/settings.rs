//! Repository for key/value settings

use anyhow::{Context, Result};
use sqlx::SqlitePool;

pub async fn get(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to get setting '{}'", key))?;

    Ok(value)
}

pub async fn set(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO settings (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to set setting '{}'", key))?;

    log::debug!("Saved setting: {}", key);
    Ok(())
}

pub async fn delete(pool: &SqlitePool, key: &str) -> Result<()> {
    sqlx::query("DELETE FROM settings WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to delete setting '{}'", key))?;

    Ok(())
}
