//! Query result handling
//!
//! Handles PostgREST row responses

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct QueryResult {
    pub success: bool,
    pub rows: Vec<Value>,
    pub error: Option<String>,
    pub status_code: Option<u16>,
}

impl QueryResult {
    pub fn success(rows: Vec<Value>, status_code: u16) -> Self {
        Self {
            success: true,
            rows,
            error: None,
            status_code: Some(status_code),
        }
    }

    pub fn error(error: String, status_code: Option<u16>) -> Self {
        Self {
            success: false,
            rows: Vec::new(),
            error: Some(error),
            status_code,
        }
    }

    /// Parse a PostgREST response body (a JSON array of rows)
    pub fn from_json(json: Value, status_code: u16) -> anyhow::Result<Self> {
        match json {
            Value::Array(rows) => Ok(Self::success(rows, status_code)),
            Value::Object(_) => Ok(Self::success(vec![json], status_code)),
            other => anyhow::bail!("Unexpected response shape: {}", other),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Turn a failed result into an error
    pub fn into_rows(self) -> anyhow::Result<Vec<Value>> {
        if !self.success {
            anyhow::bail!(
                "{}",
                self.error.unwrap_or_else(|| "Unknown backend error".to_string())
            );
        }
        Ok(self.rows)
    }

    /// Deserialize every row
    pub fn deserialize<T: DeserializeOwned>(self) -> anyhow::Result<Vec<T>> {
        self.into_rows()?
            .into_iter()
            .map(|row| serde_json::from_value(row).context("Failed to decode row"))
            .collect()
    }

    /// Deserialize zero or one row
    pub fn maybe_single<T: DeserializeOwned>(self) -> anyhow::Result<Option<T>> {
        let mut rows = self.deserialize::<T>()?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => anyhow::bail!("Expected at most one row, got {}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Role {
        role: String,
    }

    #[test]
    fn test_from_json_array() {
        let result = QueryResult::from_json(json!([{"role": "admin"}, {"role": "x"}]), 200).unwrap();
        assert!(result.is_success());
        assert_eq!(result.len(), 2);
        assert_eq!(result.rows[0]["role"], json!("admin"));
    }

    #[test]
    fn test_maybe_single() {
        let none = QueryResult::success(vec![], 200).maybe_single::<Role>().unwrap();
        assert_eq!(none, None);

        let one = QueryResult::success(vec![json!({"role": "admin"})], 200)
            .maybe_single::<Role>()
            .unwrap();
        assert_eq!(one, Some(Role { role: "admin".into() }));

        let many = QueryResult::success(vec![json!({"role": "a"}), json!({"role": "b"})], 200);
        assert!(many.maybe_single::<Role>().is_err());
    }

    #[test]
    fn test_error_result() {
        let result = QueryResult::error("permission denied for table".to_string(), Some(401));
        assert!(!result.is_success());
        let err = result.into_rows().unwrap_err();
        assert!(err.to_string().contains("permission denied"));
    }
}
