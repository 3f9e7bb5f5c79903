//! Storage layer
//!
//! A minimal asynchronous key-value interface: each key maps to one string
//! blob. The record store keeps its whole collection under a single key.
//!
//! ## Backends
//!
//! - **File**: one `<key>.json` file per key in the data directory, written
//!   atomically
//! - **Memory**: in-process map, shared between clones

pub mod error;
pub mod file;
pub mod memory;

use async_trait::async_trait;

pub use error::{StorageError, StorageResult};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

/// Asynchronous string-keyed blob store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, `None` if it was never written
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the blob stored under `key`
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}
