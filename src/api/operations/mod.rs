//! Table write operations

pub mod operation;

pub use operation::{Operation, OperationResult};
