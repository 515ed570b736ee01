//! Table client that keeps the session token fresh

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::operations::{Operation, OperationResult};
use crate::api::query::{Query, QueryResult};
use crate::api::TableClient;

use super::session::SessionContext;

/// Wraps a table client and refreshes an expiring session before every call
pub struct SessionClient {
    session: Arc<SessionContext>,
    inner: Arc<dyn TableClient>,
}

impl SessionClient {
    pub fn new(session: Arc<SessionContext>, inner: Arc<dyn TableClient>) -> Self {
        Self { session, inner }
    }
}

#[async_trait]
impl TableClient for SessionClient {
    async fn query(&self, query: &Query) -> anyhow::Result<QueryResult> {
        self.session.fresh_token().await?;
        self.inner.query(query).await
    }

    async fn execute(&self, operation: &Operation) -> anyhow::Result<OperationResult> {
        self.session.fresh_token().await?;
        self.inner.execute(operation).await
    }
}
