//! Campsite registry
//!
//! Maps campsite display names, exactly as they are written in posts, to a
//! location and an optional region label. The registry is built once from
//! configuration and only read afterwards.

use super::GeoPoint;
use crate::CampWatchError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A campsite known to the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campsite {
    /// Display name as it appears verbatim in post text
    pub name: String,
    pub location: GeoPoint,
    /// Province label such as `경기`
    pub region: Option<String>,
}

impl Campsite {
    pub fn new<S: Into<String>>(name: S, location: GeoPoint) -> Self {
        Self {
            name: name.into(),
            location,
            region: None,
        }
    }

    #[must_use]
    pub fn with_region<S: Into<String>>(mut self, region: S) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Ordered, name-unique collection of campsites.
///
/// Iteration follows insertion order, so "first matching campsite" is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampsiteRegistry {
    sites: Vec<Campsite>,
}

impl CampsiteRegistry {
    /// Build a registry, rejecting empty or duplicate names and invalid points
    pub fn new(sites: Vec<Campsite>) -> crate::Result<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        for site in &sites {
            if site.name.trim().is_empty() {
                return Err(CampWatchError::config("Campsite name cannot be empty"));
            }
            if !seen.insert(site.name.as_str()) {
                return Err(CampWatchError::config(format!(
                    "Duplicate campsite name '{}'",
                    site.name
                )));
            }
            site.location.validate().map_err(|e| {
                CampWatchError::config(format!("Campsite '{}': {e}", site.name))
            })?;
        }

        Ok(Self { sites })
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Campsite> {
        self.sites.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Campsite> {
        self.sites.iter()
    }

    /// Campsites whose name appears in `text`, in registry order
    pub fn mentioned_in<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Campsite> {
        self.sites
            .iter()
            .filter(move |site| text.contains(site.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = CampsiteRegistry::new(vec![
            Campsite::new("해피캠핑장", point(37.3, 127.0)),
            Campsite::new("해피캠핑장", point(37.4, 127.1)),
        ]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Duplicate campsite name"));
    }

    #[test]
    fn test_invalid_location_rejected() {
        let bad = Campsite::new(
            "이상한캠핑장",
            GeoPoint {
                latitude: f64::NAN,
                longitude: 127.0,
            },
        );
        assert!(CampsiteRegistry::new(vec![bad]).is_err());
    }

    #[test]
    fn test_mentioned_in_keeps_registry_order() {
        let registry = CampsiteRegistry::new(vec![
            Campsite::new("자라섬 캠핑장", point(37.8165, 127.5253)),
            Campsite::new("해피캠핑장", point(37.3, 127.0)).with_region("경기"),
        ])
        .unwrap();

        let text = "해피캠핑장 또는 자라섬 캠핑장 양도합니다";
        let names: Vec<&str> = registry.mentioned_in(text).map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["자라섬 캠핑장", "해피캠핑장"]);
        assert_eq!(
            registry.get("해피캠핑장").and_then(|s| s.region.as_deref()),
            Some("경기")
        );
    }
}
