//! Location filtering
//!
//! Three strategies, picked by the caller per board:
//! - `distance`: a mentioned campsite must lie within `max_distance_km` of the target
//! - `region`: a mentioned campsite, or the text itself, must name a target region
//! - `skip`: location is not filtered

use crate::CampWatchError;
use crate::models::{CampsiteRegistry, GeoPoint, RegionSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Location filtering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    #[default]
    #[serde(alias = "Distance", alias = "DISTANCE")]
    Distance,
    #[serde(alias = "Region", alias = "REGION")]
    Region,
    #[serde(alias = "Skip", alias = "SKIP")]
    Skip,
}

impl fmt::Display for LocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LocationMode::Distance => "distance",
            LocationMode::Region => "region",
            LocationMode::Skip => "skip",
        };
        f.write_str(s)
    }
}

impl FromStr for LocationMode {
    type Err = CampWatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(LocationMode::Distance),
            "region" => Ok(LocationMode::Region),
            "skip" => Ok(LocationMode::Skip),
            other => Err(CampWatchError::validation(format!(
                "Unknown location mode '{other}'. Must be one of: distance, region, skip"
            ))),
        }
    }
}

/// What the location stage found
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationOutcome {
    /// A mentioned campsite is close enough
    WithinDistance { campsite: String, distance_km: f64 },
    /// A mentioned campsite lies in a target region
    RegionCampsite { campsite: String, region: String },
    /// The text names a target region directly
    RegionText { variant: String },
    /// Location filtering is disabled
    Skipped,
    NoMatch,
}

impl LocationOutcome {
    pub fn is_match(&self) -> bool {
        !matches!(self, LocationOutcome::NoMatch)
    }
}

impl fmt::Display for LocationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationOutcome::WithinDistance {
                campsite,
                distance_km,
            } => write!(f, "{campsite} ({distance_km:.1}km)"),
            LocationOutcome::RegionCampsite { campsite, region } => {
                write!(f, "{campsite} in {region}")
            }
            LocationOutcome::RegionText { variant } => write!(f, "mentions {variant}"),
            LocationOutcome::Skipped => f.write_str("skipped"),
            LocationOutcome::NoMatch => f.write_str("no match"),
        }
    }
}

/// Location stage configuration snapshot
#[derive(Debug, Clone)]
pub struct LocationFilter {
    pub mode: LocationMode,
    pub target: GeoPoint,
    pub max_distance_km: f64,
    pub registry: CampsiteRegistry,
    pub regions: RegionSet,
}

impl LocationFilter {
    /// A filter that accepts every post
    pub fn skip() -> Self {
        Self {
            mode: LocationMode::Skip,
            target: GeoPoint {
                latitude: 0.0,
                longitude: 0.0,
            },
            max_distance_km: 0.0,
            registry: CampsiteRegistry::default(),
            regions: RegionSet::default(),
        }
    }

    pub fn distance(target: GeoPoint, max_distance_km: f64, registry: CampsiteRegistry) -> Self {
        Self {
            mode: LocationMode::Distance,
            target,
            max_distance_km,
            registry,
            regions: RegionSet::default(),
        }
    }

    pub fn region(target: GeoPoint, registry: CampsiteRegistry, regions: RegionSet) -> Self {
        Self {
            mode: LocationMode::Region,
            target,
            max_distance_km: 0.0,
            registry,
            regions,
        }
    }

    /// Same snapshot under another mode
    #[must_use]
    pub fn with_mode(mut self, mode: LocationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn evaluate(&self, text: &str) -> LocationOutcome {
        match self.mode {
            LocationMode::Skip => LocationOutcome::Skipped,
            LocationMode::Distance => self.evaluate_distance(text),
            LocationMode::Region => self.evaluate_region(text),
        }
    }

    /// Is the location acceptable?
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.evaluate(text).is_match()
    }

    fn evaluate_distance(&self, text: &str) -> LocationOutcome {
        for campsite in self.registry.mentioned_in(text) {
            let distance_km = self.target.distance_km(&campsite.location);
            trace!(
                "Campsite '{}' mentioned, {:.2}km from target",
                campsite.name, distance_km
            );
            if distance_km <= self.max_distance_km {
                return LocationOutcome::WithinDistance {
                    campsite: campsite.name.clone(),
                    distance_km,
                };
            }
        }
        LocationOutcome::NoMatch
    }

    fn evaluate_region(&self, text: &str) -> LocationOutcome {
        for campsite in self.registry.mentioned_in(text) {
            let Some(label) = campsite.region.as_deref() else {
                continue;
            };
            if let Some(region) = self.regions.find_by_label(label) {
                trace!("Campsite '{}' is in target region {}", campsite.name, region.label);
                return LocationOutcome::RegionCampsite {
                    campsite: campsite.name.clone(),
                    region: region.label.clone(),
                };
            }
        }

        match self.regions.first_mentioned_in(text) {
            Some(variant) => LocationOutcome::RegionText { variant },
            None => LocationOutcome::NoMatch,
        }
    }
}
