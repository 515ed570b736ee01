//! Session, role and credential handling

pub mod client;
pub mod credentials;
pub mod role;
pub mod session;

pub use client::SessionClient;
pub use role::{RoleInfo, RoleStatus, lookup_role};
pub use session::{SessionContext, SessionState, SessionStore, StoredSession};
