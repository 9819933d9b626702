//! Geographic point model

use crate::CampWatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point on the earth in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a validated point.
    ///
    /// Rejects non-finite values and coordinates outside the usual
    /// latitude/longitude ranges.
    pub fn new(latitude: f64, longitude: f64) -> crate::Result<Self> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    /// Check that both coordinates are finite and in range
    pub fn validate(&self) -> crate::Result<()> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(CampWatchError::validation(format!(
                "Coordinates must be finite numbers, got: ({}, {})",
                self.latitude, self.longitude
            )));
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CampWatchError::validation(format!(
                "Latitude must be between -90 and 90, got: {}",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CampWatchError::validation(format!(
                "Longitude must be between -180 and 180, got: {}",
                self.longitude
            )));
        }

        Ok(())
    }

    /// Great-circle distance to another point in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        crate::geo::haversine_km(self, other)
    }

    /// Format point as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.format_coordinates())
    }
}

/// Parse coordinates from a string like "37.2919,126.9907" or "37.2919 126.9907"
impl FromStr for GeoPoint {
    type Err = CampWatchError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input
            .trim()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(CampWatchError::validation(
                "Coordinates must be in format 'lat,lon'",
            ));
        }

        let lat = parts[0]
            .parse::<f64>()
            .map_err(|_| CampWatchError::validation(format!("Invalid latitude: {}", parts[0])))?;
        let lon = parts[1]
            .parse::<f64>()
            .map_err(|_| CampWatchError::validation(format!("Invalid longitude: {}", parts[1])))?;

        Self::new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        let point: GeoPoint = "37.2919,126.9907".parse().unwrap();
        assert_eq!(point.latitude, 37.2919);
        assert_eq!(point.longitude, 126.9907);

        let point: GeoPoint = "37.2919 126.9907".parse().unwrap();
        assert_eq!(point.latitude, 37.2919);

        let point: GeoPoint = "-33.86, 151.2".parse().unwrap();
        assert_eq!(point.longitude, 151.2);
    }

    #[test]
    fn test_parse_invalid_coordinates() {
        assert!("91.0,8.0".parse::<GeoPoint>().is_err());
        assert!("46.0,-181.0".parse::<GeoPoint>().is_err());
        assert!("Suwon".parse::<GeoPoint>().is_err());
        assert!("1,2,3".parse::<GeoPoint>().is_err());
    }

    #[test]
    fn test_nan_is_rejected() {
        let err = GeoPoint::new(f64::NAN, 127.0).unwrap_err();
        assert!(matches!(err, CampWatchError::Validation { .. }));
        assert!(GeoPoint::new(37.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        let point = GeoPoint::new(37.291_938, 126.990_794).unwrap();
        assert_eq!(point.to_string(), "(37.2919, 126.9908)");
    }
}
