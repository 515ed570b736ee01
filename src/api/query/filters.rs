//! PostgREST filter building
//!
//! Filters render to PostgREST query parameters (`user_id=eq.abc`) and can
//! also be evaluated against a JSON row, which the in-memory backend relies on.

use serde_json::Value;

/// Exact-match condition on one column
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, String),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    /// Render as a `(key, value)` query parameter pair
    pub fn to_query_param(&self) -> (String, String) {
        match self {
            Filter::Eq(field, value) => (field.clone(), format!("eq.{}", value)),
        }
    }

    /// Evaluate this filter against a JSON object row
    pub fn matches(&self, row: &Value) -> bool {
        match self {
            Filter::Eq(field, expected) => match row.get(field) {
                Some(Value::String(actual)) => actual == expected,
                // PostgREST compares text representations for non-text columns
                Some(Value::Number(n)) => &n.to_string() == expected,
                Some(Value::Bool(b)) => &b.to_string() == expected,
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_param() {
        assert_eq!(
            Filter::eq("user_id", "abc").to_query_param(),
            ("user_id".to_string(), "eq.abc".to_string())
        );
        assert_eq!(
            Filter::eq("dimensao", "APOIO DA CHEFIA").to_query_param(),
            ("dimensao".to_string(), "eq.APOIO DA CHEFIA".to_string())
        );
    }

    #[test]
    fn test_matches_rows() {
        let row = json!({"id": "1", "valor": 4, "ativo": true, "setor": null});

        assert!(Filter::eq("id", "1").matches(&row));
        assert!(!Filter::eq("id", "2").matches(&row));
        assert!(Filter::eq("valor", "4").matches(&row));
        assert!(Filter::eq("ativo", "true").matches(&row));
        assert!(!Filter::eq("setor", "null").matches(&row));
        assert!(!Filter::eq("missing", "x").matches(&row));
    }
}
