//! Migration manager for running up/down migrations

use anyhow::{Context, Result};
use log::{debug, info, warn};
use sqlx::SqlitePool;

use super::{
    Direction, Migration, calculate_checksum, get_applied_migrations, get_current_version, get_pending_migrations,
    init_migration_table, load_migrations, validate_migrations,
};

pub struct MigrationManager<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MigrationManager<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations
    pub async fn migrate_up(&self) -> Result<()> {
        init_migration_table(self.pool).await?;
        validate_migrations(self.pool).await?;

        let pending = get_pending_migrations(self.pool).await?;
        if pending.is_empty() {
            debug!("No pending migrations");
            return Ok(());
        }

        info!("Running {} pending migrations", pending.len());
        for migration in pending {
            self.apply(&migration, Direction::Up).await?;
        }
        Ok(())
    }

    /// Roll back to `target_version` (everything when `None`)
    pub async fn migrate_down(&self, target_version: Option<i64>) -> Result<()> {
        init_migration_table(self.pool).await?;
        validate_migrations(self.pool).await?;

        let target = target_version.unwrap_or(0);
        let current = get_current_version(self.pool).await?.unwrap_or(0);
        if target >= current {
            info!("Already at or below target version {}", target);
            return Ok(());
        }

        let available = load_migrations()?;
        for applied in get_applied_migrations(self.pool).await?.into_iter().rev() {
            if applied.version <= target {
                continue;
            }
            let migration = available
                .get(&applied.version)
                .with_context(|| format!("Cannot rollback migration {}: file not found", applied.version))?;
            self.apply(migration, Direction::Down).await?;
        }
        Ok(())
    }

    async fn apply(&self, migration: &Migration, direction: Direction) -> Result<()> {
        let sql = match direction {
            Direction::Up => &migration.up_sql,
            Direction::Down => &migration.down_sql,
        };

        if sql.trim().is_empty() {
            warn!("Migration {} has empty {} SQL, skipping", migration.version, direction.label());
            return Ok(());
        }

        info!("Migration {} '{}' ({})", migration.version, migration.name, direction.label());
        debug!("Executing SQL:\n{}", sql);

        let mut tx = self.pool.begin().await.context("Failed to start migration transaction")?;

        sqlx::query(sql)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to execute migration {} {} SQL", migration.version, direction.label()))?;

        match direction {
            Direction::Up => {
                sqlx::query("INSERT INTO schema_migrations (version, name, checksum) VALUES (?, ?, ?)")
                    .bind(migration.version)
                    .bind(&migration.name)
                    .bind(calculate_checksum(&migration.up_sql))
                    .execute(&mut *tx)
                    .await
                    .context("Failed to record migration")?;
            }
            Direction::Down => {
                sqlx::query("DELETE FROM schema_migrations WHERE version = ?")
                    .bind(migration.version)
                    .execute(&mut *tx)
                    .await
                    .context("Failed to remove migration record")?;
            }
        }

        tx.commit().await.context("Failed to commit migration transaction")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::db;

    #[tokio::test]
    async fn test_up_is_idempotent_and_down_reverts() {
        let pool = db::connect_memory().await.unwrap();
        let manager = MigrationManager::new(&pool);

        manager.migrate_up().await.unwrap();
        manager.migrate_up().await.unwrap();
        assert_eq!(get_current_version(&pool).await.unwrap(), Some(1));

        manager.migrate_down(None).await.unwrap();
        assert_eq!(get_current_version(&pool).await.unwrap(), None);

        let tables: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE name = 'sessions'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(tables, 0);
    }
}
