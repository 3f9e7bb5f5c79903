//! Geolocation
//!
//! One best-effort fix per request, bounded by a timeout.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::CapabilityError;
use crate::models::Location;

/// How long to wait for a position fix
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Source of the current position
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Location, CapabilityError>;
}

/// Position entered by the user
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    location: Location,
}

impl FixedGeolocator {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            location: Location::new(latitude, longitude),
        }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Location, CapabilityError> {
        if !self.location.is_valid() {
            return Err(CapabilityError::InvalidCoordinate {
                latitude: self.location.latitude,
                longitude: self.location.longitude,
            });
        }
        Ok(self.location)
    }
}

/// Request one fix, giving up after `timeout`
pub async fn locate_with_timeout(
    geolocator: &dyn Geolocator,
    timeout: Duration,
) -> Result<Location, CapabilityError> {
    match tokio::time::timeout(timeout, geolocator.current_position()).await {
        Ok(result) => {
            if let Ok(location) = &result {
                debug!(%location, "position fix");
            }
            result
        }
        Err(_) => Err(CapabilityError::Timeout),
    }
}
