//! Repository layer for configuration database operations

pub mod sessions;
pub mod settings;
