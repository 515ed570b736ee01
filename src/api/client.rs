use super::constants::{self, headers};
use super::models::BackendConfig;
use super::operations::{Operation, OperationResult};
use super::query::{Query, QueryResult};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Table-scoped access to the backend
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Run a select
    async fn query(&self, query: &Query) -> anyhow::Result<QueryResult>;

    /// Run an insert or delete
    async fn execute(&self, operation: &Operation) -> anyhow::Result<OperationResult>;
}

/// Shared, swappable bearer token
///
/// The session context writes it on sign-in/sign-out and the REST client reads it
/// on every request, so the client never needs to be rebuilt.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(Arc<RwLock<Option<String>>>);

impl BearerToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.into());
    }

    pub fn clear(&self) {
        let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    pub fn get(&self) -> Option<String> {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Build the shared HTTP client with connection pooling
pub fn build_http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(10)           // Max idle connections per host
        .pool_idle_timeout(Duration::from_secs(90))  // Keep connections alive for 90s
        .timeout(Duration::from_secs(30))     // Request timeout
        .connect_timeout(Duration::from_secs(10))    // Connection timeout
        .user_agent(concat!("hseit-risk/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Pull the most useful message out of a backend error body
pub fn error_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let from_json = parsed.as_ref().and_then(|json| {
        ["message", "msg", "error_description", "error"]
            .iter()
            .find_map(|key| json.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
    });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => format!("HTTP {}", status),
    }
}

/// PostgREST table client over reqwest
#[derive(Clone)]
pub struct RestClient {
    config: BackendConfig,
    http_client: reqwest::Client,
    token: BearerToken,
}

impl RestClient {
    pub fn new(config: BackendConfig, token: BearerToken) -> anyhow::Result<Self> {
        Ok(Self::with_custom_client(config, token, build_http_client()?))
    }

    /// Create a new client with custom HTTP client configuration
    pub fn with_custom_client(config: BackendConfig, token: BearerToken, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
            token,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Session token when signed in, anon key otherwise
    fn bearer(&self) -> String {
        self.token.get().unwrap_or_else(|| self.config.anon_key.clone())
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        let url = constants::table_endpoint(&self.config.url, table);
        self.http_client
            .request(method, url)
            .header(headers::APIKEY, &self.config.anon_key)
            .bearer_auth(self.bearer())
    }

    async fn insert(&self, table: &str, rows: &[Value]) -> anyhow::Result<OperationResult> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .header("Prefer", headers::PREFER_RETURN_REPRESENTATION)
            .json(rows)
            .send()
            .await
            .with_context(|| format!("Failed to send insert into {}", table))?;

        self.parse_operation_response(response).await
    }

    async fn delete(&self, table: &str, params: &[(String, String)]) -> anyhow::Result<OperationResult> {
        let response = self
            .request(reqwest::Method::DELETE, table)
            .header("Prefer", headers::PREFER_RETURN_MINIMAL)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Failed to send delete from {}", table))?;

        self.parse_operation_response(response).await
    }

    async fn parse_operation_response(&self, response: reqwest::Response) -> anyhow::Result<OperationResult> {
        let status_code = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();

        if !(200..300).contains(&status_code) {
            return Ok(OperationResult::error(error_message(status_code, &text), Some(status_code)));
        }

        if text.trim().is_empty() {
            return Ok(OperationResult::success(Vec::new(), status_code));
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(rows)) => Ok(OperationResult::success(rows, status_code)),
            Ok(row) => Ok(OperationResult::success(vec![row], status_code)),
            Err(e) => Ok(OperationResult::error(format!("Invalid JSON response: {}", e), Some(status_code))),
        }
    }

    async fn parse_query_response(&self, response: reqwest::Response) -> anyhow::Result<QueryResult> {
        let status_code = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();

        if !(200..300).contains(&status_code) {
            return Ok(QueryResult::error(error_message(status_code, &text), Some(status_code)));
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(json) => match QueryResult::from_json(json, status_code) {
                Ok(result) => Ok(result),
                Err(e) => Ok(QueryResult::error(e.to_string(), Some(status_code))),
            },
            Err(e) => Ok(QueryResult::error(format!("Invalid JSON response: {}", e), Some(status_code))),
        }
    }
}

#[async_trait]
impl TableClient for RestClient {
    async fn query(&self, query: &Query) -> anyhow::Result<QueryResult> {
        let params = query.to_query_params();
        log::debug!("GET {} {:?}", query.table, params);

        let response = self
            .request(reqwest::Method::GET, &query.table)
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("Failed to query {}", query.table))?;

        self.parse_query_response(response).await
    }

    async fn execute(&self, operation: &Operation) -> anyhow::Result<OperationResult> {
        log::debug!("{}", operation.describe());

        match operation {
            Operation::Insert { table, rows } => self.insert(table, rows).await,
            Operation::Delete { table, filters } => {
                if filters.is_empty() {
                    anyhow::bail!("Refusing to delete from {} without a filter", table);
                }
                let params: Vec<(String, String)> = filters.iter().map(|f| f.to_query_param()).collect();
                self.delete(table, &params).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(400, r#"{"message":"violates row-level security"}"#), "violates row-level security");
        assert_eq!(error_message(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#), "Invalid login credentials");
        assert_eq!(error_message(502, "Bad gateway"), "Bad gateway");
        assert_eq!(error_message(500, ""), "HTTP 500");
    }

    #[test]
    fn test_bearer_falls_back_to_anon_key() {
        let token = BearerToken::new();
        let client = RestClient::with_custom_client(
            BackendConfig::new("http://localhost:54321", "anon"),
            token.clone(),
            reqwest::Client::new(),
        );
        assert_eq!(client.bearer(), "anon");

        token.set("user-jwt");
        assert_eq!(client.bearer(), "user-jwt");

        token.clear();
        assert_eq!(client.bearer(), "anon");
    }
}
