//! Repository for `respostas_questionario` (append-only)

use anyhow::{Context, Result};

use crate::api::constants::tables;
use crate::api::{Operation, TableClient};
use crate::survey::model::AnswerRow;

/// Persist one answer row
pub async fn insert(client: &dyn TableClient, answer: &AnswerRow) -> Result<()> {
    let row = serde_json::to_value(answer).context("Failed to encode answer")?;
    Operation::insert(tables::ANSWERS, row)
        .execute(client)
        .await?
        .into_result()?;

    log::info!(
        "Saved answer for question {} (participant {})",
        answer.id_questao,
        answer.id_participante
    );
    Ok(())
}
