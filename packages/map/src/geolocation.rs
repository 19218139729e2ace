//! One-shot device geolocation.

use air_map_geography_models::Coordinates;
use async_trait::async_trait;
use thiserror::Error;

/// Why a position fix could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The user refused the permission prompt.
    #[error("Location permission denied")]
    Denied,
    /// The device could not produce a fix.
    #[error("Location unavailable: {0}")]
    Unavailable(String),
    /// The platform has no geolocation capability.
    #[error("Geolocation is not supported on this device")]
    Unsupported,
}

/// Source of a single position fix. No retries, no timeout.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Requests the current position once.
    ///
    /// # Errors
    ///
    /// * If the permission is denied, the device has no fix, or the platform
    ///   has no geolocation
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// A geolocator that always answers with the same result.
#[derive(Debug, Clone)]
pub struct FixedGeolocator(pub Result<Coordinates, GeolocationError>);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.0.clone()
    }
}
