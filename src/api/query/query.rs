//! Reusable table query description

use super::filters::Filter;
use super::orderby::OrderByClause;

/// How many rows the caller expects back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// Any number of rows
    #[default]
    Many,
    /// Zero or one row; more than one is an error, so two are fetched at most
    MaybeSingle,
}

/// A select against one table
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub select: Option<Vec<String>>,
    pub filters: Vec<Filter>,
    pub orderby: OrderByClause,
    pub limit: Option<u32>,
    pub cardinality: Cardinality,
}

impl Query {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: None,
            filters: Vec::new(),
            orderby: OrderByClause::new(),
            limit: None,
            cardinality: Cardinality::Many,
        }
    }

    /// Row limit sent to the backend; a zero-or-one select needs only two
    /// rows to detect a violation
    pub fn effective_limit(&self) -> Option<u32> {
        match (self.cardinality, self.limit) {
            (Cardinality::MaybeSingle, Some(limit)) => Some(limit.min(2)),
            (Cardinality::MaybeSingle, None) => Some(2),
            (Cardinality::Many, limit) => limit,
        }
    }

    /// Render as PostgREST query parameters
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        let select = self
            .select
            .as_ref()
            .map(|fields| fields.join(","))
            .unwrap_or_else(|| "*".to_string());
        params.push(("select".to_string(), select));

        for filter in &self.filters {
            params.push(filter.to_query_param());
        }

        if let Some(order) = self.orderby.to_postgrest_string() {
            params.push(("order".to_string(), order));
        }

        if let Some(limit) = self.effective_limit() {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}
