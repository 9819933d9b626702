//! Data models for `CampWatch`
//!
//! - Location: validated geographic points
//! - Campsite: the campsite registry used for location matching
//! - Region: target regions and their spelling variants
//! - Post: raw forum posts handed to the qualifier

pub mod campsite;
pub mod location;
pub mod post;
pub mod region;

pub use campsite::{Campsite, CampsiteRegistry};
pub use location::GeoPoint;
pub use post::Post;
pub use region::{Region, RegionSet};
