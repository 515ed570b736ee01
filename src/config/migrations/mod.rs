//! Embedded, versioned migrations for the configuration database

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashSet};

pub mod manager;

pub use manager::MigrationManager;

#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub up_sql: String,
    pub down_sql: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub applied_at: chrono::DateTime<chrono::Utc>,
    pub checksum: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Load every migration under `files/` (directories named `NNN_name`)
pub fn load_migrations() -> Result<BTreeMap<i64, Migration>> {
    use include_dir::{Dir, include_dir};

    static MIGRATIONS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/config/migrations/files");

    let mut migrations = BTreeMap::new();

    for entry in MIGRATIONS_DIR.dirs() {
        let dir_name = entry
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .context("Invalid migration directory name")?;

        let (version, name) = dir_name
            .split_once('_')
            .with_context(|| format!("Invalid migration directory format: {}. Expected NNN_name", dir_name))?;
        let version: i64 = version
            .parse()
            .with_context(|| format!("Invalid migration version in directory: {}", dir_name))?;

        let read = |file: &str| -> Result<String> {
            let path = format!("{}/{}", dir_name, file);
            Ok(MIGRATIONS_DIR
                .get_file(&path)
                .with_context(|| format!("Missing {} in migration {}", file, dir_name))?
                .contents_utf8()
                .with_context(|| format!("{} is not valid UTF-8 in migration {}", file, dir_name))?
                .to_string())
        };

        migrations.insert(
            version,
            Migration {
                version,
                name: name.to_string(),
                up_sql: read("up.sql")?,
                down_sql: read("down.sql")?,
            },
        );
    }

    if migrations.is_empty() {
        anyhow::bail!("No migrations found in files directory");
    }

    Ok(migrations)
}

pub async fn init_migration_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            checksum TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create schema_migrations table")?;

    Ok(())
}

pub async fn get_applied_migrations(pool: &SqlitePool) -> Result<Vec<AppliedMigration>> {
    sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, name, applied_at, checksum FROM schema_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .context("Failed to get applied migrations")
}

/// Checksum of the migration SQL, with line endings normalized to LF
pub fn calculate_checksum(sql: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let normalized = sql.replace("\r\n", "\n").replace('\r', "\n");

    let mut hasher = DefaultHasher::new();
    normalized.hash(&mut hasher);
    format!("{:x}", hasher.finish())
}

/// Fail if an applied migration was edited or removed
pub async fn validate_migrations(pool: &SqlitePool) -> Result<()> {
    let available = load_migrations()?;

    for applied in get_applied_migrations(pool).await? {
        let Some(migration) = available.get(&applied.version) else {
            anyhow::bail!(
                "Applied migration {} '{}' not found in available migrations",
                applied.version,
                applied.name
            );
        };

        let expected = calculate_checksum(&migration.up_sql);
        if applied.checksum != expected {
            anyhow::bail!(
                "Migration {} checksum mismatch! Applied: {}, Expected: {}",
                applied.version,
                applied.checksum,
                expected
            );
        }
    }

    Ok(())
}

pub async fn get_pending_migrations(pool: &SqlitePool) -> Result<Vec<Migration>> {
    let applied: HashSet<i64> = get_applied_migrations(pool)
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    Ok(load_migrations()?
        .into_values()
        .filter(|m| !applied.contains(&m.version))
        .collect())
}

pub async fn get_current_version(pool: &SqlitePool) -> Result<Option<i64>> {
    sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await
        .context("Failed to get current migration version")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_migrations_load() {
        let migrations = load_migrations().unwrap();
        let initial = migrations.get(&1).unwrap();
        assert_eq!(initial.name, "initial");
        assert!(initial.up_sql.contains("CREATE TABLE IF NOT EXISTS sessions"));
    }

    #[test]
    fn test_checksum_ignores_line_endings() {
        assert_eq!(calculate_checksum("a\r\nb"), calculate_checksum("a\nb"));
        assert_ne!(calculate_checksum("a"), calculate_checksum("b"));
    }
}
