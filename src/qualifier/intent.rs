//! Offer vs. request detection
//!
//! A post qualifies only when it offers a transfer. The rules are plain
//! substring checks applied in a fixed order; the order matters because
//! offer and seeking phrases regularly appear in the same post.

use serde::Serialize;
use tracing::trace;

pub const DEFAULT_OFFER_MARKER: &str = "양도";
pub const DEFAULT_STRONG_SEEKING_PHRASES: &[&str] = &["구합니다", "구해요"];
pub const DEFAULT_ACCOMPANYING_SEEKING_PHRASES: &[&str] = &["받아요", "해주세요", "해주실 분"];

/// Why an intent check came out the way it did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IntentVerdict {
    /// Offer marker present, no seeking phrase
    Offer,
    /// Offer marker missing
    NoOfferMarker,
    /// A phrase that always means "looking for" was found
    StrongSeeking(String),
    /// A phrase that turns the offer marker into a request was found
    AccompanyingSeeking(String),
}

impl IntentVerdict {
    pub fn is_offer(&self) -> bool {
        matches!(self, IntentVerdict::Offer)
    }
}

/// Ordered phrase rules deciding whether a post offers a transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRules {
    offer_marker: String,
    strong_seeking: Vec<String>,
    accompanying_seeking: Vec<String>,
}

impl IntentRules {
    pub fn new<S: Into<String>>(
        offer_marker: S,
        strong_seeking: impl IntoIterator<Item = impl Into<String>>,
        accompanying_seeking: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            offer_marker: offer_marker.into(),
            strong_seeking: strong_seeking.into_iter().map(Into::into).collect(),
            accompanying_seeking: accompanying_seeking.into_iter().map(Into::into).collect(),
        }
    }

    /// Apply the rules in order:
    /// 1. no offer marker -> not an offer
    /// 2. strong seeking phrase anywhere -> not an offer
    /// 3. accompanying seeking phrase anywhere -> not an offer
    /// 4. otherwise an offer
    ///
    /// An empty offer marker never matches.
    #[must_use]
    pub fn evaluate(&self, text: &str) -> IntentVerdict {
        if self.offer_marker.is_empty() || !text.contains(self.offer_marker.as_str()) {
            return IntentVerdict::NoOfferMarker;
        }

        if let Some(phrase) = find_any(&self.strong_seeking, text) {
            trace!("Strong seeking phrase '{}' found", phrase);
            return IntentVerdict::StrongSeeking(phrase.to_string());
        }

        if let Some(phrase) = find_any(&self.accompanying_seeking, text) {
            trace!("Accompanying seeking phrase '{}' found", phrase);
            return IntentVerdict::AccompanyingSeeking(phrase.to_string());
        }

        IntentVerdict::Offer
    }

    /// Does the text offer a transfer?
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.evaluate(text).is_offer()
    }
}

impl Default for IntentRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_OFFER_MARKER,
            DEFAULT_STRONG_SEEKING_PHRASES.iter().copied(),
            DEFAULT_ACCOMPANYING_SEEKING_PHRASES.iter().copied(),
        )
    }
}

fn find_any<'a>(phrases: &'a [String], text: &str) -> Option<&'a str> {
    phrases
        .iter()
        .map(String::as_str)
        .find(|phrase| !phrase.is_empty() && text.contains(phrase))
}
