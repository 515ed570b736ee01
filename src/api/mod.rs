//! Backend access layer
//!
//! REST table access (PostgREST dialect) and password auth (GoTrue), plus an
//! in-memory backend implementing the same traits for tests and demo mode.

pub mod auth;
pub mod client;
pub mod constants;
pub mod memory;
pub mod models;
pub mod operations;
pub mod query;

pub use auth::{AuthApi, GoTrueAuth};
pub use client::{BearerToken, RestClient, TableClient};
pub use memory::MemoryBackend;
pub use models::{AuthSession, AuthUser, BackendConfig, SignUpOutcome, SignUpRequest, TokenInfo};
pub use operations::{Operation, OperationResult};
pub use query::{Filter, OrderBy, Query, QueryBuilder, QueryResult};
