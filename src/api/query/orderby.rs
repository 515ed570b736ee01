//! PostgREST ordering
//!
//! Provides type-safe ordering construction for table queries

use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBy {
    Asc(String),
    Desc(String),
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self::Asc(field.into())
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::Desc(field.into())
    }

    pub fn field(&self) -> &str {
        match self {
            OrderBy::Asc(field) | OrderBy::Desc(field) => field,
        }
    }

    /// Convert to a PostgREST `order` term
    pub fn to_postgrest_string(&self) -> String {
        match self {
            OrderBy::Asc(field) => format!("{}.asc", field),
            OrderBy::Desc(field) => format!("{}.desc", field),
        }
    }

    /// Compare two rows on this clause's field
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let ordering = compare_values(
            a.get(self.field()).unwrap_or(&Value::Null),
            b.get(self.field()).unwrap_or(&Value::Null),
        );
        match self {
            OrderBy::Asc(_) => ordering,
            OrderBy::Desc(_) => ordering.reverse(),
        }
    }
}

/// Nulls sort last, numbers numerically, everything else by text
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// Helper to combine multiple OrderBy clauses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderByClause {
    clauses: Vec<OrderBy>,
}

impl OrderByClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, order: OrderBy) -> Self {
        self.clauses.push(order);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn to_postgrest_string(&self) -> Option<String> {
        if self.clauses.is_empty() {
            None
        } else {
            let terms: Vec<String> = self.clauses.iter().map(OrderBy::to_postgrest_string).collect();
            Some(terms.join(","))
        }
    }

    /// Compare two rows clause by clause
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        self.clauses
            .iter()
            .map(|clause| clause.compare(a, b))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_string() {
        let clause = OrderByClause::new()
            .add(OrderBy::asc("created_at"))
            .add(OrderBy::desc("nome_area"));
        assert_eq!(clause.to_postgrest_string().as_deref(), Some("created_at.asc,nome_area.desc"));
        assert_eq!(OrderByClause::new().to_postgrest_string(), None);
    }

    #[test]
    fn test_row_comparison() {
        let mut rows = vec![
            json!({"nome_area": "RH", "n": 2}),
            json!({"nome_area": "Financeiro", "n": 10}),
            json!({"nome_area": null, "n": 1}),
        ];

        let by_name = OrderByClause::new().add(OrderBy::asc("nome_area"));
        rows.sort_by(|a, b| by_name.compare(a, b));
        assert_eq!(rows[0]["nome_area"], "Financeiro");
        assert!(rows[2]["nome_area"].is_null());

        let by_n_desc = OrderByClause::new().add(OrderBy::desc("n"));
        rows.sort_by(|a, b| by_n_desc.compare(a, b));
        assert_eq!(rows[0]["n"], 10);
    }
}
