//! Repository for `questoes_cadastradas`

use anyhow::{Context, Result};
use serde_json::Value;

use crate::api::constants::tables;
use crate::api::query::{OrderBy, QueryBuilder};
use crate::api::{Operation, TableClient};
use crate::survey::model::{NewQuestion, Question};

/// All registered questions, oldest first (questionnaire order)
pub async fn list_for_survey(client: &dyn TableClient) -> Result<Vec<Question>> {
    list(client, OrderBy::asc("created_at")).await
}

/// All registered questions, newest first (registry listing)
pub async fn list_recent(client: &dyn TableClient) -> Result<Vec<Question>> {
    list(client, OrderBy::desc("created_at")).await
}

async fn list(client: &dyn TableClient, order: OrderBy) -> Result<Vec<Question>> {
    let questions = QueryBuilder::new(tables::QUESTIONS)
        .orderby(order)
        .execute(client)
        .await
        .context("Failed to load questions")?
        .deserialize::<Question>()?;

    log::debug!("Loaded {} question(s)", questions.len());
    Ok(questions)
}

/// Insert every draft in a single request
pub async fn insert_many(client: &dyn TableClient, questions: &[NewQuestion]) -> Result<usize> {
    let rows = questions
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()
        .context("Failed to encode questions")?;

    let inserted = Operation::insert_many(tables::QUESTIONS, rows)
        .execute(client)
        .await?
        .into_result()?;

    log::info!("Registered {} question(s)", questions.len());
    Ok(inserted.len())
}

pub async fn delete(client: &dyn TableClient, id: &str) -> Result<()> {
    Operation::delete_by_id(tables::QUESTIONS, id)
        .execute(client)
        .await?
        .into_result()?;

    log::info!("Deleted question {}", id);
    Ok(())
}
