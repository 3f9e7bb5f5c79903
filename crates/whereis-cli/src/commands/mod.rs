//! CLI command implementations

pub mod config;
pub mod entry;
pub mod record;
