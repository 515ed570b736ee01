//! Repository for `profiles`

use anyhow::{Context, Result};

use crate::api::constants::tables;
use crate::api::query::QueryBuilder;
use crate::api::TableClient;
use crate::survey::model::Profile;

/// Organization and full name of a user, if the profile row exists
pub async fn get(client: &dyn TableClient, user_id: &str) -> Result<Option<Profile>> {
    QueryBuilder::new(tables::PROFILES)
        .select(&["organization", "full_name"])
        .eq("id", user_id)
        .maybe_single()
        .execute(client)
        .await
        .with_context(|| format!("Failed to load profile for {}", user_id))?
        .maybe_single::<Profile>()
}

/// Like [`get`], but a missing row is an error
pub async fn require(client: &dyn TableClient, user_id: &str) -> Result<Profile> {
    get(client, user_id)
        .await?
        .with_context(|| format!("Perfil não encontrado para o usuário {}", user_id))
}
