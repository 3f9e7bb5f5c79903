//! Where Is Core Library
//!
//! This crate provides the core functionality for Where Is, a local record
//! store for noting where physical items are kept: a name, a description,
//! an optional photo and an optional GPS coordinate.
//!
//! # Architecture
//!
//! - **Key-value storage**: the whole record collection is one JSON array
//!   under the `records` key
//! - **Record store**: load-mutate-save cycles over that blob
//!
//! # Quick Start
//!
//! ```text
//! let store = RecordStore::open()?;
//!
//! // Add a record
//! let fields = RecordFields::new("Passport", "desk, second drawer");
//! let record = store.create(fields).await?;
//!
//! // Query records
//! let all = store.load_all().await;
//! let matches = filter_by_name(&all, "pass");
//! ```
//!
//! # Modules
//!
//! - `store`: Record store (main entry point)
//! - `models`: Item records and their fields
//! - `command`: Command enum routed to the store
//! - `search`: Name filter over a loaded collection
//! - `storage`: Key-value backends
//! - `capability`: Photo import, geolocation, permission prompts
//! - `config`: Application configuration

pub mod capability;
pub mod command;
pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod search;
pub mod storage;
pub mod store;

pub use capability::CapabilityError;
pub use command::{Command, CommandOutcome};
pub use config::Config;
pub use error::{RecordError, RecordResult, ValidationError};
pub use id::IdGenerator;
pub use models::{ItemRecord, Location, RecordFields, RecordId};
pub use search::filter_by_name;
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageError};
pub use store::{RecordStore, RECORDS_KEY};
