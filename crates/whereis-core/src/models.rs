//! Data models for Where Is
//!
//! Defines the item record and the field set used to create or replace one.
//! The serialized shape matches the `records` blob written by earlier
//! versions of the app, so existing data loads unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Opaque record identifier
///
/// New ids are RFC 3339 timestamps with millisecond precision, but any
/// string read from storage is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for listings
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Creation time encoded in the id, if it carries one
    ///
    /// Understands both timestamp ids and the plain millisecond ids written
    /// by the first release.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(dt.with_timezone(&Utc));
        }
        self.0
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A GPS coordinate
///
/// Latitude and longitude always travel together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and within WGS84 bounds
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// A note about where a physical item is
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRecord {
    /// Unique identifier, never changes after creation
    pub id: RecordId,
    /// Item name
    pub name: String,
    /// Free-text description of where the item is
    pub description: String,
    /// Path of the photo copied into app storage
    #[serde(rename = "image", alias = "photoPath", alias = "photo", default)]
    pub photo_path: Option<String>,
    /// Where the record was captured
    #[serde(default)]
    pub location: Option<Location>,
    /// Keys this version does not know about, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemRecord {
    /// Build a record from an id and a full field set
    pub fn from_fields(id: RecordId, fields: RecordFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            photo_path: fields.photo_path,
            location: fields.location,
            extra: Map::new(),
        }
    }

    /// The mutable part of this record
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            name: self.name.clone(),
            description: self.description.clone(),
            photo_path: self.photo_path.clone(),
            location: self.location,
        }
    }

    /// Overwrite every field except the id
    ///
    /// Absent optional fields clear the stored value. Unknown keys are kept.
    pub fn replace_fields(&mut self, fields: RecordFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.photo_path = fields.photo_path;
        self.location = fields.location;
    }
}

/// Everything a user supplies when creating or editing a record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordFields {
    pub name: String,
    pub description: String,
    pub photo_path: Option<String>,
    pub location: Option<Location>,
}

impl RecordFields {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            photo_path: None,
            location: None,
        }
    }

    pub fn with_photo(mut self, path: impl Into<String>) -> Self {
        self.photo_path = Some(path.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Check required fields, reporting both-missing as one error
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.field_errors().as_slice() {
            [] => Ok(()),
            [single] => Err(single.clone()),
            _ => Err(ValidationError::NameAndDescriptionRequired),
        }
    }

    /// Per-field errors for inline display
    pub fn field_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ValidationError::NameRequired);
        }
        if self.description.trim().is_empty() {
            errors.push(ValidationError::DescriptionRequired);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        let fields = RecordFields::new("Passport", "desk drawer");
        assert!(fields.validate().is_ok());
        assert!(fields.field_errors().is_empty());
    }

    #[test]
    fn test_validate_both_missing() {
        let fields = RecordFields::new("", "   ");
        assert_eq!(
            fields.validate(),
            Err(ValidationError::NameAndDescriptionRequired)
        );
        assert_eq!(
            fields.field_errors(),
            vec![
                ValidationError::NameRequired,
                ValidationError::DescriptionRequired
            ]
        );
    }

    #[test]
    fn test_validate_single_field() {
        assert_eq!(
            RecordFields::new(" \t", "garage").validate(),
            Err(ValidationError::NameRequired)
        );
        assert_eq!(
            RecordFields::new("Drill", "").validate(),
            Err(ValidationError::DescriptionRequired)
        );
    }

    #[test]
    fn test_deserialize_legacy_shapes() {
        let json = r#"[
            {"id":"1","name":"a","description":"b","image":null,"location":null},
            {"id":"2","name":"c","description":"d","photo":"/tmp/p.jpg"},
            {"id":"3","name":"e","description":"f","photoPath":"/tmp/q.jpg",
             "location":{"latitude":1.5,"longitude":-2.0}}
        ]"#;

        let records: Vec<ItemRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].photo_path.is_none());
        assert!(records[0].location.is_none());
        assert_eq!(records[1].photo_path.as_deref(), Some("/tmp/p.jpg"));
        assert_eq!(records[2].location, Some(Location::new(1.5, -2.0)));
    }

    #[test]
    fn test_serialize_uses_image_key() {
        let record = ItemRecord::from_fields(
            RecordId::new("x"),
            RecordFields::new("Keys", "hook by the door").with_photo("/p/image_1.jpg"),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["image"], "/p/image_1.jpg");
        assert!(value["location"].is_null());
        assert!(value.get("photo_path").is_none());
    }

    #[test]
    fn test_replace_fields_clears_optionals() {
        let mut record = ItemRecord::from_fields(
            RecordId::new("x"),
            RecordFields::new("Tent", "attic")
                .with_photo("/p.jpg")
                .with_location(Location::new(10.0, 20.0)),
        );
        record.replace_fields(RecordFields::new("Tent", "basement"));

        assert_eq!(record.id.as_str(), "x");
        assert_eq!(record.description, "basement");
        assert!(record.photo_path.is_none());
        assert!(record.location.is_none());
    }

    #[test]
    fn test_record_id_created_at() {
        let id = RecordId::new("2024-12-24T18:30:00.250Z");
        let created = id.created_at().unwrap();
        assert_eq!(created.timestamp_millis(), 1_735_065_000_250);

        let legacy = RecordId::new("1735065000250");
        assert_eq!(legacy.created_at(), Some(created));

        assert!(RecordId::new("not-a-time").created_at().is_none());
    }

    #[test]
    fn test_record_id_short() {
        assert_eq!(RecordId::new("2024-12-24T18:30").short(), "2024-12-");
        assert_eq!(RecordId::new("abc").short(), "abc");
    }

    #[test]
    fn test_location_bounds() {
        assert!(Location::new(45.0, 120.0).is_valid());
        assert!(!Location::new(91.0, 0.0).is_valid());
        assert!(!Location::new(0.0, -181.0).is_valid());
        assert!(!Location::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let raw = r#"{"id":"1700000000000","name":"Tent","description":"attic","photo":"/p.jpg","color":"green"}"#;
        let record: ItemRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(record.photo_path.as_deref(), Some("/p.jpg"));
        assert_eq!(record.extra.get("color"), Some(&Value::from("green")));
        assert!(!record.extra.contains_key("photo"));

        let written: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(written["color"], "green");
        assert_eq!(written["image"], "/p.jpg");
    }
}
