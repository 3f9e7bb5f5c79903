//! Platform capabilities used while capturing a record
//!
//! Photo import, geolocation and the permission prompts gating them. Each
//! is a single call with no retry; failures are reported to the user and
//! never reach the record store.

pub mod location;
pub mod permission;
pub mod photo;

use thiserror::Error;

pub use location::{locate_with_timeout, FixedGeolocator, Geolocator, LOCATION_TIMEOUT};
pub use permission::{
    require_permission, GrantAll, Permission, PermissionPrompt, PermissionStatus,
};
pub use photo::PhotoImporter;

/// Errors from capability collaborators
#[derive(Error, Debug)]
pub enum CapabilityError {
    /// The user declined a permission prompt
    #[error("Permission Denied: {message}")]
    PermissionDenied {
        permission: Permission,
        message: &'static str,
    },

    /// Nothing was captured
    #[error("Capture cancelled")]
    Cancelled,

    /// No position fix arrived in time
    #[error("Location request timed out")]
    Timeout,

    /// Coordinate outside WGS84 bounds
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Capture or copy failed
    #[error("{0}")]
    Failed(String),
}
