//! Post qualification
//!
//! A post is worth answering when it names the target stay window, offers a
//! transfer, and sits somewhere acceptable. The three stages run in that
//! order and stop at the first failure, so later stages (and the distance
//! math) are skipped for posts that are already out.

pub mod dates;
pub mod intent;
pub mod location;

pub use dates::DateWindow;
pub use intent::{IntentRules, IntentVerdict};
pub use location::{LocationFilter, LocationMode, LocationOutcome};

use crate::config::CampWatchConfig;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Qualification stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Date,
    Intent,
    Location,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Date => "date",
            Stage::Intent => "intent",
            Stage::Location => "location",
        };
        f.write_str(s)
    }
}

/// Per-stage outcome of qualifying one post.
///
/// Stages after the first failing one are `None`: they were never evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualificationResult {
    pub date: bool,
    pub intent: Option<IntentVerdict>,
    pub location: Option<LocationOutcome>,
}

impl QualificationResult {
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        self.failed_stage().is_none()
    }

    /// The stage that rejected the post, if any
    #[must_use]
    pub fn failed_stage(&self) -> Option<Stage> {
        if !self.date {
            return Some(Stage::Date);
        }
        match &self.intent {
            Some(verdict) if verdict.is_offer() => {}
            _ => return Some(Stage::Intent),
        }
        match &self.location {
            Some(outcome) if outcome.is_match() => None,
            _ => Some(Stage::Location),
        }
    }
}

impl fmt::Display for QualificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failed_stage() {
            None => write!(f, "qualified")?,
            Some(stage) => write!(f, "rejected at {stage} stage")?,
        }
        if let Some(intent) = &self.intent {
            write!(f, " | intent: {intent:?}")?;
        }
        if let Some(location) = &self.location {
            write!(f, " | location: {location}")?;
        }
        Ok(())
    }
}

/// Immutable qualification pipeline.
///
/// Holds only compiled, read-only state, so one instance can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct Qualifier {
    window: DateWindow,
    intent: IntentRules,
    location: LocationFilter,
}

impl Qualifier {
    pub fn new(window: DateWindow, intent: IntentRules, location: LocationFilter) -> Self {
        Self {
            window,
            intent,
            location,
        }
    }

    /// Compile a qualifier from a validated configuration
    pub fn from_config(config: &CampWatchConfig) -> crate::Result<Self> {
        Ok(Self::new(
            config.date_window()?,
            config.intent_rules(),
            config.location_filter()?,
        ))
    }

    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    pub fn intent(&self) -> &IntentRules {
        &self.intent
    }

    pub fn location(&self) -> &LocationFilter {
        &self.location
    }

    /// Same qualifier with a different location mode
    #[must_use]
    pub fn with_location_mode(mut self, mode: LocationMode) -> Self {
        self.location.mode = mode;
        self
    }

    /// Run date, intent and location stages, stopping at the first failure
    pub fn qualify(&self, text: &str) -> QualificationResult {
        let mut result = QualificationResult {
            date: self.window.matches(text),
            intent: None,
            location: None,
        };
        if !result.date {
            debug!("Date criteria not met");
            return result;
        }
        debug!("Date criteria met");

        let verdict = self.intent.evaluate(text);
        let is_offer = verdict.is_offer();
        result.intent = Some(verdict);
        if !is_offer {
            debug!("Intent criteria not met: {:?}", result.intent);
            return result;
        }
        debug!("Intent criteria met");

        let outcome = self.location.evaluate(text);
        debug!(mode = %self.location.mode, "Location stage: {}", outcome);
        result.location = Some(outcome);
        result
    }

    /// Boolean shorthand for [`Qualifier::qualify`]
    pub fn is_qualified(&self, text: &str) -> bool {
        self.qualify(text).is_qualified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Campsite, CampsiteRegistry, GeoPoint};

    fn qualifier(happy_camp: GeoPoint) -> Qualifier {
        let target = GeoPoint::new(37.291_938, 126.990_794).unwrap();
        let registry =
            CampsiteRegistry::new(vec![Campsite::new("해피캠핑장", happy_camp)]).unwrap();
        Qualifier::new(
            DateWindow::default(),
            IntentRules::default(),
            LocationFilter::distance(target, 150.0, registry),
        )
    }

    const MATCHING_POST: &str = "6월 6일 부터 6월 8일 까지 양도합니다. 위치는 해피캠핑장이고요.";

    #[test]
    fn test_all_stages_pass() {
        let q = qualifier(GeoPoint::new(37.30, 127.00).unwrap());
        let result = q.qualify(MATCHING_POST);
        assert!(result.is_qualified());
        assert_eq!(result.intent, Some(IntentVerdict::Offer));
        assert!(matches!(
            result.location,
            Some(LocationOutcome::WithinDistance { .. })
        ));
    }

    #[test]
    fn test_far_campsite_fails_location() {
        let q = qualifier(GeoPoint::new(35.10, 129.04).unwrap());
        let result = q.qualify(MATCHING_POST);
        assert!(!result.is_qualified());
        assert_eq!(result.failed_stage(), Some(Stage::Location));
        assert_eq!(result.location, Some(LocationOutcome::NoMatch));
    }

    #[test]
    fn test_date_failure_short_circuits() {
        let q = qualifier(GeoPoint::new(37.30, 127.00).unwrap());
        let result = q.qualify("6월 5일~6월 7일 해피캠핑장 양도합니다");
        assert_eq!(result.failed_stage(), Some(Stage::Date));
        assert!(result.intent.is_none());
        assert!(result.location.is_none());
    }

    #[test]
    fn test_intent_failure_skips_location() {
        let q = qualifier(GeoPoint::new(37.30, 127.00).unwrap());
        let result = q.qualify("6월 6일~6월 8일 해피캠핑장 양도 구합니다");
        assert_eq!(result.failed_stage(), Some(Stage::Intent));
        assert!(result.location.is_none());
    }

    #[test]
    fn test_skip_mode_override() {
        let q = qualifier(GeoPoint::new(35.10, 129.04).unwrap())
            .with_location_mode(LocationMode::Skip);
        assert!(q.is_qualified("6/6~6/8 양도합니다"));
    }

    #[test]
    fn test_display() {
        let q = qualifier(GeoPoint::new(37.30, 127.00).unwrap());
        assert_eq!(q.qualify("아무 글").to_string(), "rejected at date stage");
        assert!(q.qualify(MATCHING_POST).to_string().starts_with("qualified"));
    }

    #[test]
    fn test_qualifier_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Qualifier>();
    }
}
