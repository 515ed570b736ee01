//! Table query module
//!
//! Provides a fluent API for building and executing PostgREST selects.
//! Follows the same pattern as operations with Query (reusable) and QueryBuilder (fluent).

pub mod builder;
pub mod filters;
pub mod orderby;
pub mod query;
pub mod result;

pub use builder::QueryBuilder;
pub use filters::Filter;
pub use orderby::{OrderBy, OrderByClause};
pub use query::{Cardinality, Query};
pub use result::QueryResult;
