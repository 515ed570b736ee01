//! Row types for the local configuration database

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::api::TokenInfo;
use crate::auth::StoredSession;

/// Setting keys
pub mod keys {
    pub const BACKEND_URL: &str = "backend_url";
    pub const ANON_KEY: &str = "anon_key";
}

/// Environment variables overriding stored backend settings
pub mod env {
    pub const BACKEND_URL: &str = "HSEIT_BACKEND_URL";
    pub const ANON_KEY: &str = "HSEIT_ANON_KEY";
}

#[derive(Debug, Clone, FromRow)]
pub struct DbSession {
    pub user_id: String,
    pub email: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbSession> for StoredSession {
    fn from(row: DbSession) -> Self {
        StoredSession {
            user_id: row.user_id,
            email: row.email,
            token: TokenInfo {
                access_token: row.access_token,
                refresh_token: row.refresh_token,
                expires_at: row.expires_at,
            },
        }
    }
}
