//! Repository for `areas_cadastradas`

use anyhow::{Context, Result};

use crate::api::constants::tables;
use crate::api::query::{OrderBy, QueryBuilder};
use crate::api::{Operation, TableClient};
use crate::survey::model::{Area, NewArea};

/// Areas sorted by name, used by the sector picker
pub async fn list_by_name(client: &dyn TableClient) -> Result<Vec<Area>> {
    list(client, OrderBy::asc("nome_area")).await
}

/// Areas newest first, used by the registry
pub async fn list_recent(client: &dyn TableClient) -> Result<Vec<Area>> {
    list(client, OrderBy::desc("created_at")).await
}

async fn list(client: &dyn TableClient, order: OrderBy) -> Result<Vec<Area>> {
    QueryBuilder::new(tables::AREAS)
        .orderby(order)
        .execute(client)
        .await
        .context("Failed to load areas")?
        .deserialize::<Area>()
}

pub async fn insert(client: &dyn TableClient, area: &NewArea) -> Result<()> {
    let row = serde_json::to_value(area).context("Failed to encode area")?;
    Operation::insert(tables::AREAS, row)
        .execute(client)
        .await?
        .into_result()?;

    log::info!("Registered area '{}'", area.nome_area);
    Ok(())
}

pub async fn delete(client: &dyn TableClient, id: &str) -> Result<()> {
    Operation::delete_by_id(tables::AREAS, id)
        .execute(client)
        .await?
        .into_result()?;

    log::info!("Deleted area {}", id);
    Ok(())
}
