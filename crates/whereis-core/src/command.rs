//! Command dispatch
//!
//! User gestures from any front end are expressed as a [`Command`] and
//! routed to the record store, so front ends never need to know which store
//! operation backs which action.

use tracing::debug;

use crate::error::RecordResult;
use crate::models::{ItemRecord, RecordFields, RecordId};
use crate::search::retain_by_name;
use crate::storage::KeyValueStore;
use crate::store::RecordStore;

/// An action against the record collection
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create(RecordFields),
    Update { id: RecordId, fields: RecordFields },
    Delete(RecordId),
    Find(RecordId),
    /// Reload and filter by name; an empty query lists everything
    Search(String),
}

/// What a dispatched command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Created(ItemRecord),
    /// `None` when no record had the id
    Updated(Option<ItemRecord>),
    /// Whether a record was removed
    Deleted(bool),
    Found(Option<ItemRecord>),
    Listed(Vec<ItemRecord>),
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Route a command to the matching store operation
    pub async fn dispatch(&self, command: Command) -> RecordResult<CommandOutcome> {
        debug!(?command, "dispatching");
        let outcome = match command {
            Command::Create(fields) => CommandOutcome::Created(self.create(fields).await?),
            Command::Update { id, fields } => {
                CommandOutcome::Updated(self.update(&id, fields).await?)
            }
            Command::Delete(id) => CommandOutcome::Deleted(self.delete(&id).await?),
            Command::Find(id) => CommandOutcome::Found(self.find_by_id(&id).await),
            Command::Search(query) => {
                CommandOutcome::Listed(retain_by_name(self.load_all().await, &query))
            }
        };
        Ok(outcome)
    }
}
