//! QueryBuilder for fluent query construction
//!
//! Provides a fluent API that builds Query objects for execution

use super::filters::Filter;
use super::orderby::OrderBy;
use super::query::{Cardinality, Query};
use super::result::QueryResult;
use crate::api::client::TableClient;

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            query: Query::new(table),
        }
    }

    /// Select specific columns
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.query.select = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    /// Add a filter condition (conditions are ANDed)
    pub fn filter(mut self, filter: Filter) -> Self {
        self.query.filters.push(filter);
        self
    }

    /// Shorthand for an exact-match filter
    pub fn eq(self, field: &str, value: impl Into<String>) -> Self {
        self.filter(Filter::eq(field, value))
    }

    /// Add ordering
    pub fn orderby(mut self, order: OrderBy) -> Self {
        self.query.orderby = self.query.orderby.add(order);
        self
    }

    /// Limit number of results
    pub fn limit(mut self, limit: u32) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Expect zero or one row
    pub fn maybe_single(mut self) -> Self {
        self.query.cardinality = Cardinality::MaybeSingle;
        self
    }

    /// Build the final Query object (reusable)
    pub fn build(self) -> Query {
        self.query
    }

    /// Build and execute immediately
    pub async fn execute(self, client: &dyn TableClient) -> anyhow::Result<QueryResult> {
        let query = self.build();
        client.query(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_query_builder() {
        let query = QueryBuilder::new("questoes_cadastradas")
            .select(&["id", "pergunta"])
            .eq("organizacao", "ACME")
            .orderby(OrderBy::asc("created_at"))
            .limit(10)
            .build();

        assert_eq!(query.table, "questoes_cadastradas");
        assert_eq!(query.select, Some(vec!["id".to_string(), "pergunta".to_string()]));
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.orderby.to_postgrest_string().as_deref(), Some("created_at.asc"));
    }

    #[test]
    fn test_maybe_single() {
        let query = QueryBuilder::new("user_roles")
            .eq("user_id", "u-1")
            .maybe_single()
            .build();
        assert_eq!(query.cardinality, Cardinality::MaybeSingle);
        assert_eq!(query.effective_limit(), Some(2));
    }
}
