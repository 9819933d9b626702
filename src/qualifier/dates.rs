//! Target stay window matching
//!
//! The window is a fixed span (June 6-8, two nights and three days) written
//! in many ways by posters. Rather than parsing dates, the window is a set of
//! literal renderings compiled to regexes.

use crate::CampWatchError;
use regex::{Regex, RegexBuilder};
use tracing::trace;

/// Explicit renderings of June 6-8
pub const DEFAULT_WINDOW_PATTERNS: &[&str] = &[
    // 6월 6일 ~ 6월 8일
    r"6월\s*6일\s*~\s*6월\s*8일",
    // 6/6 ~ 6/8
    r"6/6\s*~\s*6/8",
    // June 6 ~ June 8, June 6th to June 8th
    r"June\s*6(th)?\s*(~|to)\s*June\s*8(th)?",
    // 6월 6일, 7일, 8일
    r"6월\s*6일\s*,\s*7일\s*,\s*8일",
    // 6월 6,7,8일
    r"6월\s*6\s*,\s*7\s*,\s*8\s*일",
    // June 6, 7, 8
    r"June\s*6\s*,\s*7\s*,\s*8",
    // 6/6, 7, 8
    r"6/6\s*,\s*7\s*,\s*8",
    // 6월 6일 부터 6월 8일 까지
    r"6월\s*6일\s*(부터|에서)\s*6월\s*8일\s*까지",
    // 6월 6일 부터 8일 까지
    r"6월\s*6일\s*(부터|에서)\s*8일\s*까지",
];

/// Markers for a two-night, three-day stay
pub const DEFAULT_STAY_MARKERS: &[&str] = &["2박 3일", "2박3일"];

/// Ways of writing the first day of the window
pub const DEFAULT_START_DAY_PATTERNS: &[&str] = &[r"6월\s*6일", r"6/6", r"June\s*6"];

/// Compiled matcher for the target stay window
#[derive(Debug, Clone)]
pub struct DateWindow {
    ranges: Vec<Regex>,
    stay_markers: Vec<String>,
    start_days: Vec<Regex>,
}

impl DateWindow {
    /// Compile a window from pattern strings.
    ///
    /// All patterns are case-insensitive so latin month names match in any case.
    pub fn new<S: AsRef<str>>(
        patterns: &[S],
        stay_markers: &[S],
        start_day_patterns: &[S],
    ) -> crate::Result<Self> {
        Ok(Self {
            ranges: compile_all(patterns)?,
            stay_markers: stay_markers
                .iter()
                .map(|m| m.as_ref().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
            start_days: compile_all(start_day_patterns)?,
        })
    }

    /// Does the text name the target window?
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        if let Some(range) = self.ranges.iter().find(|re| re.is_match(text)) {
            trace!("Window matched explicit pattern {}", range.as_str());
            return true;
        }

        // "2박 3일" plus the first day implies the whole window
        let has_stay_marker = self
            .stay_markers
            .iter()
            .any(|marker| text.contains(marker.as_str()));
        if has_stay_marker && self.start_days.iter().any(|re| re.is_match(text)) {
            trace!("Window inferred from stay marker and start day");
            return true;
        }

        false
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::new(
            DEFAULT_WINDOW_PATTERNS,
            DEFAULT_STAY_MARKERS,
            DEFAULT_START_DAY_PATTERNS,
        )
        .expect("built-in date patterns compile")
    }
}

fn compile_all<S: AsRef<str>>(patterns: &[S]) -> crate::Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            let p = p.as_ref();
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|e| CampWatchError::pattern(p, e))
        })
        .collect()
}
