//! Role lookup against `user_roles`

use serde::Deserialize;

use crate::api::TableClient;
use crate::api::constants::tables;
use crate::api::query::QueryBuilder;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleInfo {
    pub role: Option<String>,
    pub is_admin: bool,
}

impl RoleInfo {
    pub fn from_role(role: Option<String>) -> Self {
        let is_admin = role.as_deref() == Some(ADMIN_ROLE);
        Self { role, is_admin }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Role as tracked by a page: a pending lookup is not a denial
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleStatus {
    Loading,
    Resolved(RoleInfo),
}

impl RoleStatus {
    /// `None` while the lookup is still running
    pub fn is_admin(&self) -> Option<bool> {
        match self {
            RoleStatus::Loading => None,
            RoleStatus::Resolved(info) => Some(info.is_admin),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    role: String,
}

/// Point read of the user's role; failures resolve to "no role"
pub async fn lookup_role(client: &dyn TableClient, user_id: &str) -> RoleInfo {
    let result = QueryBuilder::new(tables::USER_ROLES)
        .select(&["role"])
        .eq("user_id", user_id)
        .maybe_single()
        .execute(client)
        .await
        .and_then(|result| result.maybe_single::<RoleRow>());

    match result {
        Ok(row) => {
            let info = RoleInfo::from_role(row.map(|r| r.role));
            log::debug!("Role for {}: {:?}", user_id, info.role);
            info
        }
        Err(e) => {
            log::error!("Failed to fetch role for {}: {:#}", user_id, e);
            RoleInfo::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryBackend;

    #[tokio::test]
    async fn test_lookup_role() {
        let backend = MemoryBackend::new();
        backend.grant_role("u-admin", "admin");
        backend.grant_role("u-viewer", "visualizador");

        assert!(lookup_role(&backend, "u-admin").await.is_admin);

        let viewer = lookup_role(&backend, "u-viewer").await;
        assert_eq!(viewer.role.as_deref(), Some("visualizador"));
        assert!(!viewer.is_admin);

        assert_eq!(lookup_role(&backend, "u-nobody").await, RoleInfo::none());
    }

    #[tokio::test]
    async fn test_lookup_failure_means_no_role() {
        let backend = MemoryBackend::new();
        backend.grant_role("u-admin", "admin");
        backend.fail_table(tables::USER_ROLES, "permission denied");
        assert_eq!(lookup_role(&backend, "u-admin").await, RoleInfo::none());
    }

    #[test]
    fn test_loading_is_not_denied() {
        assert_eq!(RoleStatus::Loading.is_admin(), None);
        assert_eq!(RoleStatus::Resolved(RoleInfo::none()).is_admin(), Some(false));
    }
}
