//! Configuration management for `CampWatch`
//!
//! Handles loading configuration from files and environment variables,
//! validates it, and turns it into the pieces the qualifier runs on.

use crate::CampWatchError;
use crate::models::{Campsite, CampsiteRegistry, GeoPoint, Region, RegionSet};
use crate::qualifier::dates::{
    DEFAULT_START_DAY_PATTERNS, DEFAULT_STAY_MARKERS, DEFAULT_WINDOW_PATTERNS,
};
use crate::qualifier::intent::{
    DEFAULT_ACCOMPANYING_SEEKING_PHRASES, DEFAULT_OFFER_MARKER, DEFAULT_STRONG_SEEKING_PHRASES,
};
use crate::qualifier::{DateWindow, IntentRules, LocationFilter, LocationMode};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampWatchConfig {
    /// Location filtering and reply settings
    #[serde(default)]
    pub qualifier: QualifierConfig,
    /// Target stay window renderings
    #[serde(default)]
    pub window: WindowConfig,
    /// Offer/seeking phrases
    #[serde(default)]
    pub intent: IntentConfig,
    /// Known campsites, in matching order
    #[serde(default = "default_campsites")]
    pub campsites: Vec<CampsiteConfig>,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualifierConfig {
    #[serde(default)]
    pub location_mode: LocationMode,
    /// Maximum campsite distance from the target in distance mode
    #[serde(default = "default_max_distance")]
    pub max_distance_km: f64,
    /// Where the user lives
    #[serde(default = "default_target")]
    pub target: TargetConfig,
    /// Regions accepted in region mode
    #[serde(default = "default_target_regions")]
    pub target_regions: Vec<Region>,
    /// Reply posted on qualified posts
    #[serde(default = "default_comment_text")]
    pub comment_text: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetConfig {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Regexes that each name the whole window
    #[serde(default = "default_window_patterns")]
    pub patterns: Vec<String>,
    /// "2 nights 3 days" markers
    #[serde(default = "default_stay_markers")]
    pub stay_markers: Vec<String>,
    /// Regexes for the first day, used together with a stay marker
    #[serde(default = "default_start_day_patterns")]
    pub start_day_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentConfig {
    #[serde(default = "default_offer_marker")]
    pub offer_marker: String,
    #[serde(default = "default_strong_seeking")]
    pub strong_seeking_phrases: Vec<String>,
    #[serde(default = "default_accompanying_seeking")]
    pub accompanying_seeking_phrases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampsiteConfig {
    /// Name exactly as written in posts
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub region: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_max_distance() -> f64 {
    150.0
}

fn default_target() -> TargetConfig {
    // 경기도 수원시 장안구
    TargetConfig {
        latitude: 37.291_938,
        longitude: 126.990_794,
    }
}

fn default_target_regions() -> Vec<Region> {
    vec![Region::new("경기")]
}

fn default_comment_text() -> String {
    "저요".to_string()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_window_patterns() -> Vec<String> {
    to_strings(DEFAULT_WINDOW_PATTERNS)
}

fn default_stay_markers() -> Vec<String> {
    to_strings(DEFAULT_STAY_MARKERS)
}

fn default_start_day_patterns() -> Vec<String> {
    to_strings(DEFAULT_START_DAY_PATTERNS)
}

fn default_offer_marker() -> String {
    DEFAULT_OFFER_MARKER.to_string()
}

fn default_strong_seeking() -> Vec<String> {
    to_strings(DEFAULT_STRONG_SEEKING_PHRASES)
}

fn default_accompanying_seeking() -> Vec<String> {
    to_strings(DEFAULT_ACCOMPANYING_SEEKING_PHRASES)
}

fn default_campsites() -> Vec<CampsiteConfig> {
    let site = |name: &str, latitude, longitude, region: &str| CampsiteConfig {
        name: name.to_string(),
        latitude,
        longitude,
        region: Some(region.to_string()),
    };
    vec![
        site("용인 자연휴양림", 37.2387, 127.2045, "경기"),
        site("자라섬 캠핑장", 37.8165, 127.5253, "경기"),
        site("서울대공원 캠핑장", 37.427, 127.016, "경기"),
        site("해피캠핑장", 37.30, 127.00, "경기"),
        site("망상오토캠핑리조트", 37.43, 129.045, "강원"),
        site("먼곳캠핑장", 38.50, 128.00, "강원"),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for QualifierConfig {
    fn default() -> Self {
        Self {
            location_mode: LocationMode::default(),
            max_distance_km: default_max_distance(),
            target: default_target(),
            target_regions: default_target_regions(),
            comment_text: default_comment_text(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            patterns: default_window_patterns(),
            stay_markers: default_stay_markers(),
            start_day_patterns: default_start_day_patterns(),
        }
    }
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            offer_marker: default_offer_marker(),
            strong_seeking_phrases: default_strong_seeking(),
            accompanying_seeking_phrases: default_accompanying_seeking(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for CampWatchConfig {
    fn default() -> Self {
        Self {
            qualifier: QualifierConfig::default(),
            window: WindowConfig::default(),
            intent: IntentConfig::default(),
            campsites: default_campsites(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CampWatchConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|p| p.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. CAMPWATCH__QUALIFIER__LOCATION_MODE=region
        builder = builder.add_source(
            Environment::with_prefix("CAMPWATCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: CampWatchConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("campwatch").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_location()?;
        self.date_window()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        let max = self.qualifier.max_distance_km;
        if !max.is_finite() || max < 0.0 {
            return Err(CampWatchError::config(format!(
                "Maximum distance must be a non-negative number of kilometers, got: {max}"
            ))
            .into());
        }

        self.target_point()
            .map_err(|e| CampWatchError::config(format!("Target location: {e}")))?;

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CampWatchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CampWatchError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.intent.offer_marker.trim().is_empty() {
            return Err(CampWatchError::config("Offer marker cannot be empty").into());
        }

        if self.window.patterns.is_empty() {
            return Err(
                CampWatchError::config("At least one date window pattern is required").into(),
            );
        }

        Ok(())
    }

    fn validate_location(&self) -> Result<()> {
        self.registry()?;

        if self.qualifier.location_mode == LocationMode::Region
            && self.qualifier.target_regions.is_empty()
        {
            return Err(
                CampWatchError::config("Region mode needs at least one target region").into(),
            );
        }

        if self
            .qualifier
            .target_regions
            .iter()
            .any(|r| r.label.trim().is_empty())
        {
            return Err(CampWatchError::config("Target region label cannot be empty").into());
        }

        Ok(())
    }

    /// The validated target point
    pub fn target_point(&self) -> crate::Result<GeoPoint> {
        GeoPoint::new(
            self.qualifier.target.latitude,
            self.qualifier.target.longitude,
        )
    }

    /// Campsite registry in configuration order
    pub fn registry(&self) -> crate::Result<CampsiteRegistry> {
        let sites = self
            .campsites
            .iter()
            .map(|c| -> crate::Result<Campsite> {
                let location = GeoPoint::new(c.latitude, c.longitude).map_err(|e| {
                    CampWatchError::config(format!("Campsite '{}': {e}", c.name))
                })?;
                let site = Campsite::new(c.name.clone(), location);
                Ok(match &c.region {
                    Some(region) => site.with_region(region.clone()),
                    None => site,
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;

        CampsiteRegistry::new(sites)
    }

    pub fn date_window(&self) -> crate::Result<DateWindow> {
        DateWindow::new(
            &self.window.patterns,
            &self.window.stay_markers,
            &self.window.start_day_patterns,
        )
    }

    pub fn intent_rules(&self) -> IntentRules {
        IntentRules::new(
            self.intent.offer_marker.clone(),
            self.intent.strong_seeking_phrases.iter().cloned(),
            self.intent.accompanying_seeking_phrases.iter().cloned(),
        )
    }

    pub fn location_filter(&self) -> crate::Result<LocationFilter> {
        Ok(LocationFilter {
            mode: self.qualifier.location_mode,
            target: self.target_point()?,
            max_distance_km: self.qualifier.max_distance_km,
            registry: self.registry()?,
            regions: RegionSet::new(self.qualifier.target_regions.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CampWatchConfig::default();
        assert_eq!(config.qualifier.location_mode, LocationMode::Distance);
        assert_eq!(config.qualifier.max_distance_km, 150.0);
        assert_eq!(config.qualifier.comment_text, "저요");
        assert_eq!(config.intent.offer_marker, "양도");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = CampWatchConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_negative_distance() {
        let mut config = CampWatchConfig::default();
        config.qualifier.max_distance_km = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Maximum distance"));
    }

    #[test]
    fn test_config_validation_nan_target() {
        let mut config = CampWatchConfig::default();
        config.qualifier.target.latitude = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_duplicate_campsite() {
        let mut config = CampWatchConfig::default();
        let duplicate = config.campsites[0].clone();
        config.campsites.push(duplicate);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate campsite name"));
    }

    #[test]
    fn test_config_validation_bad_pattern() {
        let mut config = CampWatchConfig::default();
        config.window.patterns.push("6월(".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid pattern"));
    }

    #[test]
    fn test_config_validation_region_mode_needs_regions() {
        let mut config = CampWatchConfig::default();
        config.qualifier.location_mode = LocationMode::Region;
        config.qualifier.target_regions.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Region mode"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[qualifier]
location_mode = "region"
max_distance_km = 80.0

[[qualifier.target_regions]]
label = "충북"
aliases = ["충청북도"]

[[campsites]]
name = "괴산 캠핑장"
latitude = 36.81
longitude = 127.79
region = "충북"

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = CampWatchConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.qualifier.location_mode, LocationMode::Region);
        assert_eq!(config.qualifier.max_distance_km, 80.0);
        assert_eq!(config.qualifier.target_regions[0].aliases, vec!["충청북도"]);
        assert_eq!(config.campsites.len(), 1);
        assert_eq!(config.logging.level, "debug");
        // untouched sections keep their defaults
        assert_eq!(config.intent.offer_marker, "양도");
        assert_eq!(config.window.patterns.len(), DEFAULT_WINDOW_PATTERNS.len());
    }

    #[test]
    fn test_location_filter_from_config() {
        let config = CampWatchConfig::default();
        let filter = config.location_filter().unwrap();
        assert_eq!(filter.registry.len(), config.campsites.len());
        assert!(filter.matches("해피캠핑장"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = CampWatchConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("campwatch"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
