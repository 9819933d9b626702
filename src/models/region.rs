//! Target regions and their spelling variants
//!
//! Korean provinces show up in posts in several spellings: the short form
//! (`경기`), the `-도` suffixed form (`경기도`) and long official names
//! (`충청북도` for `충북`). A [`Region`] carries its label plus any extra
//! aliases, and [`Region::variants`] expands them for text scanning.

use serde::{Deserialize, Serialize};

const PROVINCE_SUFFIX: char = '도';

/// A region label with alternative spellings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Short form, e.g. `경기`
    pub label: String,
    /// Additional long forms, e.g. `경기도` or `충청북도`
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Region {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Every spelling of this region, label first, without duplicates
    #[must_use]
    pub fn variants(&self) -> Vec<String> {
        let mut variants = vec![self.label.clone()];

        if !self.label.ends_with(PROVINCE_SUFFIX) {
            variants.push(format!("{}{PROVINCE_SUFFIX}", self.label));
        }

        for alias in &self.aliases {
            if !alias.is_empty() && !variants.contains(alias) {
                variants.push(alias.clone());
            }
        }

        variants
    }

    /// Whether a campsite's region label names this region
    #[must_use]
    pub fn is_named(&self, label: &str) -> bool {
        let label = label.trim();
        self.variants().iter().any(|v| v == label)
    }
}

/// The set of regions a caller is interested in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Returns the target region a campsite label belongs to, if any
    pub fn find_by_label(&self, label: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.is_named(label))
    }

    /// First region variant that appears verbatim in `text`
    pub fn first_mentioned_in(&self, text: &str) -> Option<String> {
        self.regions
            .iter()
            .flat_map(Region::variants)
            .find(|variant| text.contains(variant.as_str()))
    }
}

impl FromIterator<Region> for RegionSet {
    fn from_iter<T: IntoIterator<Item = Region>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_add_province_suffix() {
        let region = Region::new("경기");
        assert_eq!(region.variants(), vec!["경기", "경기도"]);
    }

    #[test]
    fn test_variants_keep_suffixed_label() {
        let region = Region::new("제주도");
        assert_eq!(region.variants(), vec!["제주도"]);
    }

    #[test]
    fn test_variants_include_aliases_once() {
        let region = Region::new("충북").with_aliases(["충청북도", "충북도"]);
        assert_eq!(region.variants(), vec!["충북", "충북도", "충청북도"]);
    }

    #[test]
    fn test_find_by_label() {
        let regions: RegionSet = [Region::new("경기"), Region::new("강원")]
            .into_iter()
            .collect();
        assert_eq!(regions.find_by_label("경기도").map(|r| r.label.as_str()), Some("경기"));
        assert!(regions.find_by_label("전남").is_none());
    }

    #[test]
    fn test_first_mentioned_in() {
        let regions = RegionSet::new(vec![Region::new("충북").with_aliases(["충청북도"])]);
        assert_eq!(
            regions.first_mentioned_in("충청북도 괴산 쪽입니다"),
            Some("충청북도".to_string())
        );
        assert_eq!(regions.first_mentioned_in("서울 근교"), None);
    }
}
