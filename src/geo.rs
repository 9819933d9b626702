//! Great-circle distance helpers

use crate::models::GeoPoint;

/// Haversine distance in kilometers (mean earth radius 6371 km)
#[must_use]
pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        haversine::Location {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        haversine::Units::Kilometers,
    )
}
