//! Core write operations against backend tables

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::TableClient;
use crate::api::query::Filter;

/// A single write against one table
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Insert one or more rows in a single request
    Insert {
        table: String,
        rows: Vec<Value>,
    },
    /// Delete every row matching the filters
    Delete {
        table: String,
        filters: Vec<Filter>,
    },
}

/// Result of executing an Operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Rows returned by the backend (inserted rows with generated columns)
    pub data: Vec<Value>,
    /// Error message if the operation failed
    pub error: Option<String>,
    /// HTTP status code from the response
    pub status_code: Option<u16>,
}

impl Operation {
    /// Insert a single row
    pub fn insert(table: impl Into<String>, row: Value) -> Self {
        Self::Insert {
            table: table.into(),
            rows: vec![row],
        }
    }

    /// Insert several rows in one request
    pub fn insert_many(table: impl Into<String>, rows: Vec<Value>) -> Self {
        Self::Insert {
            table: table.into(),
            rows,
        }
    }

    /// Delete the row with the given id
    pub fn delete_by_id(table: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Delete {
            table: table.into(),
            filters: vec![Filter::eq("id", id)],
        }
    }

    pub fn table(&self) -> &str {
        match self {
            Operation::Insert { table, .. } | Operation::Delete { table, .. } => table,
        }
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            Operation::Insert { table, rows } => format!("insert {} row(s) into {}", rows.len(), table),
            Operation::Delete { table, filters } => format!("delete from {} ({} filter(s))", table, filters.len()),
        }
    }

    /// Execute this operation with the given client
    pub async fn execute(&self, client: &dyn TableClient) -> anyhow::Result<OperationResult> {
        client.execute(self).await
    }
}

impl OperationResult {
    pub fn success(data: Vec<Value>, status_code: u16) -> Self {
        Self {
            success: true,
            data,
            error: None,
            status_code: Some(status_code),
        }
    }

    pub fn error(error: String, status_code: Option<u16>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            error: Some(error),
            status_code,
        }
    }

    /// Turn a failed result into an error, returning the rows otherwise
    pub fn into_result(self) -> anyhow::Result<Vec<Value>> {
        if !self.success {
            anyhow::bail!(
                "{}",
                self.error.unwrap_or_else(|| "Unknown backend error".to_string())
            );
        }
        Ok(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors() {
        let op = Operation::delete_by_id("areas_cadastradas", "a-1");
        assert_eq!(op.table(), "areas_cadastradas");
        match &op {
            Operation::Delete { filters, .. } => assert_eq!(filters[0], Filter::eq("id", "a-1")),
            other => panic!("unexpected {:?}", other),
        }

        let bulk = Operation::insert_many("questoes_cadastradas", vec![json!({}), json!({})]);
        assert_eq!(bulk.describe(), "insert 2 row(s) into questoes_cadastradas");
    }

    #[test]
    fn test_failed_result_is_error() {
        let failed = OperationResult::error("duplicate key".into(), Some(409));
        assert_eq!(failed.into_result().unwrap_err().to_string(), "duplicate key");
    }
}
