//! Record command handlers
//!
//! One handler per app screen: creation, list and search, detail, edit,
//! and delete. Every store access goes through `RecordStore::dispatch`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use whereis_core::capability::{
    locate_with_timeout, require_permission, FixedGeolocator, Permission, PermissionPrompt,
    PhotoImporter, LOCATION_TIMEOUT,
};
use whereis_core::{
    Command, ItemRecord, KeyValueStore, Location, RecordError, RecordFields, RecordId,
    RecordStore,
};

use crate::output::Output;
use crate::prompt::confirm;

/// Photo and coordinate requested on the command line
#[derive(Debug, Clone, Default)]
pub struct CaptureRequest {
    pub photo: Option<PathBuf>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CaptureRequest {
    fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Changes requested by `edit`
#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub capture: CaptureRequest,
    pub clear_photo: bool,
    pub clear_location: bool,
}

/// Collaborators that turn a capture request into record fields
pub struct Capture<'a> {
    pub importer: PhotoImporter,
    pub prompt: &'a dyn PermissionPrompt,
}

impl Capture<'_> {
    async fn photo(&self, source: &Path) -> Result<String> {
        require_permission(self.prompt, Permission::Camera).await?;
        let saved = self
            .importer
            .import(source)
            .await
            .context("Failed to save photo")?;
        Ok(saved.to_string_lossy().into_owned())
    }

    async fn location(&self, latitude: f64, longitude: f64) -> Result<Location> {
        require_permission(self.prompt, Permission::Location).await?;
        let geolocator = FixedGeolocator::new(latitude, longitude);
        Ok(locate_with_timeout(&geolocator, LOCATION_TIMEOUT).await?)
    }
}

/// Create a new record
pub async fn add<S: KeyValueStore>(
    store: &RecordStore<S>,
    name: Option<String>,
    description: Option<String>,
    request: &CaptureRequest,
    capture: &Capture<'_>,
    output: &Output,
) -> Result<()> {
    let mut fields = RecordFields::new(name.unwrap_or_default(), description.unwrap_or_default());

    // Reject before capturing so a failed save leaves no stray photo
    fields.validate()?;

    if let Some(ref photo) = request.photo {
        fields.photo_path = Some(capture.photo(photo).await?);
    }
    if let Some((lat, lon)) = request.coordinate() {
        fields.location = Some(capture.location(lat, lon).await?);
    }

    let outcome = store
        .dispatch(Command::Create(fields))
        .await
        .map_err(|e| failure(e, "Failed to save the record."))?;
    output.print_outcome(&outcome);
    Ok(())
}

/// List records, optionally filtered by name
pub async fn list<S: KeyValueStore>(
    store: &RecordStore<S>,
    search: Option<String>,
    output: &Output,
) -> Result<()> {
    let outcome = store
        .dispatch(Command::Search(search.unwrap_or_default()))
        .await?;
    output.print_outcome(&outcome);
    Ok(())
}

/// Show a single record
pub async fn show<S: KeyValueStore>(
    store: &RecordStore<S>,
    id: String,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(&store.load_all().await, &id)?;
    let outcome = store.dispatch(Command::Find(id)).await?;
    output.print_outcome(&outcome);
    Ok(())
}

/// Edit a record, replacing it as a whole
pub async fn edit<S: KeyValueStore>(
    store: &RecordStore<S>,
    id: String,
    request: EditRequest,
    capture: &Capture<'_>,
    output: &Output,
) -> Result<()> {
    let records = store.load_all().await;
    let id = resolve_id(&records, &id)?;
    let Some(current) = records.into_iter().find(|r| r.id == id) else {
        output.message("Record not found.");
        return Ok(());
    };

    check_fields(&apply_edits(&current, &request, None, None))?;

    let photo = match request.capture.photo {
        Some(ref source) if !request.clear_photo => Some(capture.photo(source).await?),
        _ => None,
    };
    let location = match request.capture.coordinate() {
        Some((lat, lon)) if !request.clear_location => Some(capture.location(lat, lon).await?),
        _ => None,
    };

    let fields = apply_edits(&current, &request, photo, location);
    if fields == current.fields() {
        output.message("No changes.");
        return Ok(());
    }

    let outcome = store
        .dispatch(Command::Update { id, fields })
        .await
        .map_err(|e| failure(e, "Failed to save the record."))?;
    output.print_outcome(&outcome);
    Ok(())
}

/// Delete a record after confirmation
pub async fn delete<S: KeyValueStore>(
    store: &RecordStore<S>,
    id: String,
    assume_yes: bool,
    output: &Output,
) -> Result<()> {
    let records = store.load_all().await;
    let id = resolve_id(&records, &id)?;
    let Some(record) = records.iter().find(|r| r.id == id) else {
        output.message("Record not found.");
        return Ok(());
    };

    if output.should_prompt() && !assume_yes {
        println!("Delete record: {} - {}", record.id.short(), record.name);
        if !confirm("Are you sure you want to delete this note? This action cannot be undone.")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let outcome = store
        .dispatch(Command::Delete(id))
        .await
        .map_err(|e| failure(e, "Failed to delete the record."))?;
    output.print_outcome(&outcome);
    Ok(())
}

/// Fields after applying an edit request to `current`
///
/// `photo` and `location` are freshly captured values; when absent the
/// current ones are kept unless the request clears them.
fn apply_edits(
    current: &ItemRecord,
    request: &EditRequest,
    photo: Option<String>,
    location: Option<Location>,
) -> RecordFields {
    let mut fields = current.fields();
    if let Some(ref name) = request.name {
        fields.name = name.clone();
    }
    if let Some(ref description) = request.description {
        fields.description = description.clone();
    }

    if request.clear_photo {
        fields.photo_path = None;
    } else if photo.is_some() {
        fields.photo_path = photo;
    }

    if request.clear_location {
        fields.location = None;
    } else if location.is_some() {
        fields.location = location;
    }

    fields
}

/// Wrap a store error for display, adding the recovery hint when storage
/// has one
fn failure(err: RecordError, message: &str) -> anyhow::Error {
    if err.is_validation() {
        return err.into();
    }
    let message = match err.recovery_suggestion() {
        Some(hint) => format!("{} {}", message, hint),
        None => message.to_string(),
    };
    anyhow::Error::new(err).context(message)
}

/// Report every missing field at once, one per line
fn check_fields(fields: &RecordFields) -> Result<()> {
    let errors = fields.field_errors();
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    bail!(message)
}

/// Resolve a full id or a unique id prefix
///
/// Input that matches nothing is passed through unchanged so the store
/// reports it as not found.
fn resolve_id(records: &[ItemRecord], input: &str) -> Result<RecordId> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Record ID cannot be empty");
    }

    if records.iter().any(|r| r.id.as_str() == input) {
        return Ok(RecordId::new(input));
    }

    let matches: Vec<_> = records
        .iter()
        .filter(|r| r.id.as_str().starts_with(input))
        .collect();

    match matches.len() {
        0 => Ok(RecordId::new(input)),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple records match '{}':", input);
            for record in &matches {
                eprintln!("  {} - {}", record.id, record.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
