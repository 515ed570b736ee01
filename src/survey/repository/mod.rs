//! Remote table access for the survey domain
//!
//! Free async functions over [`TableClient`](crate::api::TableClient), one
//! module per table.

pub mod answers;
pub mod areas;
pub mod profiles;
pub mod questions;
