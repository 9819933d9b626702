//! Forum post model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scraped forum post.
///
/// The body is kept as raw text; everything the qualifier needs is pulled
/// out of it by pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Board-specific article id
    #[serde(default)]
    pub id: Option<String>,
    /// Permalink, used when replying
    #[serde(default)]
    pub link: Option<String>,
    pub text: String,
}

impl Post {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            id: None,
            link: None,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_link<S: Into<String>>(mut self, link: S) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Best identifier for logs and replies: link, then id
    #[must_use]
    pub fn reference(&self) -> &str {
        self.link
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("N/A")
    }

    /// First `max_chars` characters of the body, for log lines
    #[must_use]
    pub fn snippet(&self, max_chars: usize) -> String {
        let mut snippet: String = self.text.chars().take(max_chars).collect();
        if self.text.chars().count() > max_chars {
            snippet.push_str("...");
        }
        snippet
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.reference(), self.snippet(50))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_prefers_link() {
        let post = Post::new("양도합니다")
            .with_id("1234")
            .with_link("https://cafe.naver.com/chocammall/1234");
        assert_eq!(post.reference(), "https://cafe.naver.com/chocammall/1234");
        assert_eq!(Post::new("x").with_id("42").reference(), "42");
        assert_eq!(Post::new("x").reference(), "N/A");
    }

    #[test]
    fn test_snippet_counts_characters() {
        let post = Post::new("6월 6일 ~ 6월 8일 양도합니다");
        assert_eq!(post.snippet(4), "6월 6...");
        assert_eq!(post.snippet(100), post.text);
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let post: Post = serde_json::from_str(r#"{"text": "양도합니다"}"#).unwrap();
        assert_eq!(post, Post::new("양도합니다"));
    }
}
