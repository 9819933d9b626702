//! `CampWatch` - campsite transfer post qualifier
//!
//! This library decides whether a forum post offers a campsite reservation
//! transfer for the target stay window at an acceptable location, and drives
//! a reply action for the posts that qualify.

pub mod config;
pub mod error;
pub mod geo;
pub mod logging;
pub mod models;
pub mod qualifier;
pub mod workflow;

// Re-export core types for public API
pub use config::CampWatchConfig;
pub use error::CampWatchError;
pub use models::{Campsite, CampsiteRegistry, GeoPoint, Post, Region, RegionSet};
pub use qualifier::{
    DateWindow, IntentRules, IntentVerdict, LocationFilter, LocationMode, LocationOutcome,
    QualificationResult, Qualifier, Stage,
};
pub use workflow::{CommentSink, LogSink, ScanSummary, process_posts};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CampWatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
