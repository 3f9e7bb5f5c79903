//! Record store
//!
//! The `RecordStore` is the only thing that touches the persisted record
//! collection. The whole collection lives as one JSON array under a single
//! key, and every mutation is a full cycle:
//!
//! 1. read and parse the stored array
//! 2. change it in memory
//! 3. serialize and write the whole array back
//!
//! ## Concurrency
//!
//! Mutations issued through one store (or its clones) hold an async mutex
//! for the whole cycle, so they never lose each other's writes. Two stores
//! built independently over the same backing key do not share that lock;
//! between them the last full write wins.
//!
//! ## Usage
//!
//! ```ignore
//! let store = RecordStore::open()?;
//!
//! let record = store
//!     .create(RecordFields::new("Passport", "desk, second drawer"))
//!     .await?;
//!
//! let all = store.load_all().await;
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::RecordResult;
use crate::id::IdGenerator;
use crate::models::{ItemRecord, RecordFields, RecordId};
use crate::storage::{FileKeyValueStore, KeyValueStore, StorageError};

/// Key holding the serialized record collection
pub const RECORDS_KEY: &str = "records";

/// Repository for item records over a key-value backend
pub struct RecordStore<S> {
    backend: Arc<S>,
    key: String,
    write_lock: Arc<Mutex<()>>,
    ids: Arc<IdGenerator>,
}

impl<S> Clone for RecordStore<S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            key: self.key.clone(),
            write_lock: Arc::clone(&self.write_lock),
            ids: Arc::clone(&self.ids),
        }
    }
}

impl RecordStore<FileKeyValueStore> {
    /// Open the store in the configured data directory
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(&config))
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: &Config) -> Self {
        Self::new(FileKeyValueStore::new(&config.data_dir))
    }
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Wrap a backend, storing records under [`RECORDS_KEY`]
    pub fn new(backend: S) -> Self {
        Self {
            backend: Arc::new(backend),
            key: RECORDS_KEY.to_string(),
            write_lock: Arc::new(Mutex::new(())),
            ids: Arc::new(IdGenerator::new()),
        }
    }

    /// Replace the id generator (e.g. with a fixed clock)
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    // ==================== Queries ====================

    /// Load the whole collection
    ///
    /// Never fails: a key that was never written, a read failure and data
    /// that does not parse all come back as an empty collection. The cause
    /// is only visible in the logs.
    pub async fn load_all(&self) -> Vec<ItemRecord> {
        match self.read_collection().await {
            Ok(records) => records,
            Err(e) => {
                warn!(key = %self.key, "treating stored records as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Find a record by id
    pub async fn find_by_id(&self, id: &RecordId) -> Option<ItemRecord> {
        self.load_all().await.into_iter().find(|r| &r.id == id)
    }

    // ==================== Mutations ====================

    /// Validate, assign a fresh id, append and persist
    pub async fn create(&self, fields: RecordFields) -> RecordResult<ItemRecord> {
        fields.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.read_collection().await?;

        let id = self.ids.next_unique(records.iter().map(|r| &r.id));
        let record = ItemRecord::from_fields(id, fields);
        records.push(record.clone());

        self.write_collection(&records).await?;
        info!(id = %record.id, total = records.len(), "created record");
        Ok(record)
    }

    /// Replace every field but the id of the record matching `id`
    ///
    /// Returns the updated record, or `None` when no record has that id.
    /// An unknown id is not an error and leaves the stored bytes alone.
    pub async fn update(
        &self,
        id: &RecordId,
        fields: RecordFields,
    ) -> RecordResult<Option<ItemRecord>> {
        fields.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.read_collection().await?;

        let Some(record) = records.iter_mut().find(|r| &r.id == id) else {
            debug!(%id, "update matched no record");
            return Ok(None);
        };
        record.replace_fields(fields);
        let updated = record.clone();

        self.write_collection(&records).await?;
        info!(%id, "updated record");
        Ok(Some(updated))
    }

    /// Remove the record matching `id`
    ///
    /// Returns whether a record was removed. Deleting an unknown id is a
    /// no-op and writes nothing.
    pub async fn delete(&self, id: &RecordId) -> RecordResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_collection().await?;

        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            debug!(%id, "delete matched no record");
            return Ok(false);
        }

        self.write_collection(&records).await?;
        info!(%id, total = records.len(), "deleted record");
        Ok(true)
    }

    // ==================== Persistence ====================

    /// Read and parse the stored collection, surfacing failures
    ///
    /// Mutations go through here so a corrupt blob is never silently
    /// replaced by a fresh collection.
    async fn read_collection(&self) -> Result<Vec<ItemRecord>, StorageError> {
        match self.backend.get(&self.key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                debug!(key = %self.key, "no stored records yet");
                Ok(Vec::new())
            }
        }
    }

    async fn write_collection(&self, records: &[ItemRecord]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(&self.key, &raw).await.map_err(|e| {
            warn!(
                key = %self.key,
                recoverable = e.is_recoverable(),
                "failed to write records: {}",
                e
            );
            e
        })
    }
}
