//! In-process backend
//!
//! Implements both [`TableClient`] and [`AuthApi`] over plain maps so the survey
//! flow can run without a network: integration tests and `tui --demo` use it.
//! Filters, ordering, limits and projections follow PostgREST semantics closely
//! enough for the queries this crate issues.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use super::auth::AuthApi;
use super::client::TableClient;
use super::constants::tables;
use super::models::{AuthSession, AuthUser, SignUpOutcome, SignUpRequest, TokenInfo};
use super::operations::{Operation, OperationResult};
use super::query::{Query, QueryResult};

struct MemoryAccount {
    user: AuthUser,
    password: String,
}

#[derive(Default)]
struct MemoryState {
    tables: HashMap<String, Vec<Value>>,
    accounts: HashMap<String, MemoryAccount>,
    access_tokens: HashMap<String, String>,
    refresh_tokens: HashMap<String, String>,
    failures: HashMap<String, String>,
    query_counts: HashMap<String, usize>,
    ticks: i64,
    require_confirmation: bool,
}

impl MemoryState {
    /// Monotonic timestamps so `created_at` ordering is deterministic
    fn next_timestamp(&mut self) -> String {
        self.ticks += 1;
        let epoch: DateTime<Utc> = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        (epoch + Duration::seconds(self.ticks)).to_rfc3339()
    }

    fn stamp(&mut self, row: Value) -> Value {
        let mut object = match row {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        if !object.contains_key("id") {
            object.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
        }
        if !object.contains_key("created_at") {
            let ts = self.next_timestamp();
            object.insert("created_at".to_string(), json!(ts));
        }
        Value::Object(object)
    }

    fn issue_session(&mut self, user: AuthUser) -> AuthSession {
        let access_token = format!("mem-{}", Uuid::new_v4());
        let refresh_token = format!("memr-{}", Uuid::new_v4());
        self.access_tokens.insert(access_token.clone(), user.id.clone());
        self.refresh_tokens.insert(refresh_token.clone(), user.id.clone());
        AuthSession {
            user,
            token: TokenInfo {
                access_token,
                refresh_token: Some(refresh_token),
                expires_at: Utc::now() + Duration::hours(1),
            },
        }
    }

    fn user_by_id(&self, user_id: &str) -> Option<AuthUser> {
        self.accounts
            .values()
            .find(|account| account.user.id == user_id)
            .map(|account| account.user.clone())
    }
}

/// Shared in-memory tables and accounts
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert rows directly, filling `id`/`created_at` when absent
    pub fn seed(&self, table: &str, rows: Vec<Value>) -> Vec<Value> {
        let mut state = self.lock();
        let stamped: Vec<Value> = rows.into_iter().map(|row| state.stamp(row)).collect();
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(stamped.iter().cloned());
        stamped
    }

    /// Snapshot of a table's rows in insertion order
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// Make every call touching `table` fail with `message`
    pub fn fail_table(&self, table: &str, message: &str) {
        self.lock()
            .failures
            .insert(table.to_string(), message.to_string());
    }

    pub fn clear_failure(&self, table: &str) {
        self.lock().failures.remove(table);
    }

    /// Number of selects issued against `table`
    pub fn query_count(&self, table: &str) -> usize {
        self.lock().query_counts.get(table).copied().unwrap_or(0)
    }

    /// Require e-mail confirmation for new sign-ups
    pub fn require_email_confirmation(&self, required: bool) {
        self.lock().require_confirmation = required;
    }

    /// Register an account (and its profile row) directly
    pub fn add_user(&self, email: &str, password: &str, full_name: &str, organization: &str) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
            metadata: json!({ "full_name": full_name, "organization": organization }),
        };

        let mut state = self.lock();
        state.accounts.insert(
            email.to_lowercase(),
            MemoryAccount {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        let profile = state.stamp(json!({
            "id": user.id,
            "email": email,
            "full_name": full_name,
            "organization": organization,
        }));
        state
            .tables
            .entry(tables::PROFILES.to_string())
            .or_default()
            .push(profile);

        user
    }

    /// Grant a role through the `user_roles` table
    pub fn grant_role(&self, user_id: &str, role: &str) {
        self.seed(tables::USER_ROLES, vec![json!({ "user_id": user_id, "role": role })]);
    }
}

fn project(row: &Value, select: &Option<Vec<String>>) -> Value {
    match (select, row) {
        (Some(fields), Value::Object(map)) if !fields.iter().any(|f| f == "*") => {
            let projected: Map<String, Value> = fields
                .iter()
                .filter_map(|field| map.get(field).map(|v| (field.clone(), v.clone())))
                .collect();
            Value::Object(projected)
        }
        _ => row.clone(),
    }
}

#[async_trait]
impl TableClient for MemoryBackend {
    async fn query(&self, query: &Query) -> anyhow::Result<QueryResult> {
        let mut state = self.lock();
        *state.query_counts.entry(query.table.clone()).or_default() += 1;

        if let Some(message) = state.failures.get(&query.table) {
            return Ok(QueryResult::error(message.clone(), Some(400)));
        }

        let mut rows: Vec<Value> = state
            .tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if !query.orderby.is_empty() {
            rows.sort_by(|a, b| query.orderby.compare(a, b));
        }

        if let Some(limit) = query.effective_limit() {
            rows.truncate(limit as usize);
        }

        let rows = rows.iter().map(|row| project(row, &query.select)).collect();
        Ok(QueryResult::success(rows, 200))
    }

    async fn execute(&self, operation: &Operation) -> anyhow::Result<OperationResult> {
        let mut state = self.lock();

        if let Some(message) = state.failures.get(operation.table()) {
            return Ok(OperationResult::error(message.clone(), Some(400)));
        }

        match operation {
            Operation::Insert { table, rows } => {
                let stamped: Vec<Value> = rows.iter().cloned().map(|row| state.stamp(row)).collect();
                state
                    .tables
                    .entry(table.clone())
                    .or_default()
                    .extend(stamped.iter().cloned());
                Ok(OperationResult::success(stamped, 201))
            }
            Operation::Delete { table, filters } => {
                if filters.is_empty() {
                    anyhow::bail!("Refusing to delete from {} without a filter", table);
                }
                if let Some(rows) = state.tables.get_mut(table) {
                    rows.retain(|row| !filters.iter().all(|f| f.matches(row)));
                }
                Ok(OperationResult::success(Vec::new(), 204))
            }
        }
    }
}

#[async_trait]
impl AuthApi for MemoryBackend {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> anyhow::Result<AuthSession> {
        let mut state = self.lock();
        let user = match state.accounts.get(&email.to_lowercase()) {
            Some(account) if account.password == password => account.user.clone(),
            _ => anyhow::bail!("Invalid login credentials"),
        };
        Ok(state.issue_session(user))
    }

    async fn sign_up(&self, request: &SignUpRequest) -> anyhow::Result<SignUpOutcome> {
        if self.lock().accounts.contains_key(&request.email.to_lowercase()) {
            anyhow::bail!("User already registered");
        }

        let user = self.add_user(&request.email, &request.password, &request.full_name, &request.organization);

        let mut state = self.lock();
        if state.require_confirmation {
            Ok(SignUpOutcome::ConfirmationRequired {
                email: request.email.clone(),
            })
        } else {
            Ok(SignUpOutcome::SignedIn(state.issue_session(user)))
        }
    }

    async fn sign_out(&self, access_token: &str) -> anyhow::Result<()> {
        let mut state = self.lock();
        if let Some(user_id) = state.access_tokens.remove(access_token) {
            state.refresh_tokens.retain(|_, owner| owner != &user_id);
        }
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> anyhow::Result<AuthUser> {
        let state = self.lock();
        state
            .access_tokens
            .get(access_token)
            .and_then(|user_id| state.user_by_id(user_id))
            .ok_or_else(|| anyhow::anyhow!("Invalid JWT"))
    }

    async fn refresh(&self, refresh_token: &str) -> anyhow::Result<AuthSession> {
        let mut state = self.lock();
        let user = state
            .refresh_tokens
            .remove(refresh_token)
            .and_then(|user_id| state.user_by_id(&user_id))
            .ok_or_else(|| anyhow::anyhow!("Invalid Refresh Token"))?;
        Ok(state.issue_session(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::{Filter, OrderBy, QueryBuilder};

    #[tokio::test]
    async fn test_query_filters_orders_and_projects() {
        let backend = MemoryBackend::new();
        backend.seed("areas_cadastradas", vec![
            json!({"nome_area": "RH", "organizacao": "ACME"}),
            json!({"nome_area": "Financeiro", "organizacao": "ACME"}),
            json!({"nome_area": "TI", "organizacao": "Outra"}),
        ]);

        let result = QueryBuilder::new("areas_cadastradas")
            .select(&["nome_area"])
            .filter(Filter::eq("organizacao", "ACME"))
            .orderby(OrderBy::asc("nome_area"))
            .execute(&backend)
            .await
            .unwrap();

        let names: Vec<&str> = result.rows.iter().filter_map(|r| r["nome_area"].as_str()).collect();
        assert_eq!(names, vec!["Financeiro", "RH"]);
        assert!(result.rows[0].get("organizacao").is_none());
        assert_eq!(backend.query_count("areas_cadastradas"), 1);
    }

    #[tokio::test]
    async fn test_insert_stamps_and_delete_by_id() {
        let backend = MemoryBackend::new();
        let inserted = Operation::insert("areas_cadastradas", json!({"nome_area": "RH"}))
            .execute(&backend)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        let id = inserted[0]["id"].as_str().unwrap().to_string();
        assert!(inserted[0]["created_at"].is_string());

        Operation::delete_by_id("areas_cadastradas", id)
            .execute(&backend)
            .await
            .unwrap();
        assert!(backend.rows("areas_cadastradas").is_empty());
    }

    #[tokio::test]
    async fn test_maybe_single_detects_duplicates() {
        let backend = MemoryBackend::new();
        backend.seed("user_roles", vec![
            json!({"user_id": "u-1", "role": "admin"}),
            json!({"user_id": "u-1", "role": "user"}),
            json!({"user_id": "u-1", "role": "user"}),
        ]);

        let result = QueryBuilder::new("user_roles")
            .eq("user_id", "u-1")
            .maybe_single()
            .execute(&backend)
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.maybe_single::<Value>().is_err());
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let backend = MemoryBackend::new();
        backend.fail_table("respostas_questionario", "new row violates row-level security policy");

        let result = Operation::insert("respostas_questionario", json!({"valor": 1}))
            .execute(&backend)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(backend.rows("respostas_questionario").is_empty());
    }

    #[tokio::test]
    async fn test_auth_round_trip() {
        let backend = MemoryBackend::new();
        backend.add_user("ana@acme.com", "segredo1", "Ana Souza", "ACME");

        assert!(backend.sign_in_with_password("ana@acme.com", "errada").await.is_err());

        let session = backend.sign_in_with_password("ANA@acme.com", "segredo1").await.unwrap();
        let user = backend.get_user(&session.token.access_token).await.unwrap();
        assert_eq!(user.full_name(), Some("Ana Souza"));

        backend.sign_out(&session.token.access_token).await.unwrap();
        assert!(backend.get_user(&session.token.access_token).await.is_err());
        assert_eq!(backend.rows("profiles").len(), 1);
    }
}
