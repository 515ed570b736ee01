//! Repository for the persisted session (a single row)

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::auth::StoredSession;
use crate::config::models::DbSession;

/// Save or replace the session
pub async fn save(pool: &SqlitePool, session: &StoredSession) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO sessions (id, user_id, email, access_token, refresh_token, expires_at, updated_at)
        VALUES (1, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(&session.user_id)
    .bind(&session.email)
    .bind(&session.token.access_token)
    .bind(&session.token.refresh_token)
    .bind(session.token.expires_at)
    .execute(pool)
    .await
    .context("Failed to save session")?;

    log::debug!("Saved session for user: {}", session.user_id);
    Ok(())
}

pub async fn get(pool: &SqlitePool) -> Result<Option<StoredSession>> {
    let row: Option<DbSession> = sqlx::query_as(
        "SELECT user_id, email, access_token, refresh_token, expires_at, updated_at FROM sessions WHERE id = 1",
    )
    .fetch_optional(pool)
    .await
    .context("Failed to load session")?;

    Ok(row.map(StoredSession::from))
}

pub async fn delete(pool: &SqlitePool) -> Result<()> {
    let result = sqlx::query("DELETE FROM sessions WHERE id = 1")
        .execute(pool)
        .await
        .context("Failed to delete session")?;

    if result.rows_affected() > 0 {
        log::debug!("Deleted persisted session");
    }
    Ok(())
}
