//! Drives the qualifier over a batch of scraped posts
//!
//! Fetching posts and actually submitting a reply belong to the browser
//! side; here they are just data in and a [`CommentSink`] out. A failing
//! reply is logged and counted, and the batch carries on.

use crate::CampWatchError;
use crate::models::Post;
use crate::qualifier::{Qualifier, Stage};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Downstream "submit comment" action
pub trait CommentSink {
    fn submit(&mut self, post: &Post, comment: &str) -> Result<()>;
}

/// Dry-run sink: records what would be posted instead of posting it
#[derive(Debug, Default)]
pub struct LogSink {
    pub submitted: Vec<(String, String)>,
}

impl CommentSink for LogSink {
    fn submit(&mut self, post: &Post, comment: &str) -> Result<()> {
        info!("Would comment '{}' on post {}", comment, post.reference());
        self.submitted
            .push((post.reference().to_string(), comment.to_string()));
        Ok(())
    }
}

/// Counters for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub examined: usize,
    pub qualified: usize,
    pub commented: usize,
    pub failed: usize,
    pub rejected_by_date: usize,
    pub rejected_by_intent: usize,
    pub rejected_by_location: usize,
}

impl ScanSummary {
    fn record_rejection(&mut self, stage: Stage) {
        match stage {
            Stage::Date => self.rejected_by_date += 1,
            Stage::Intent => self.rejected_by_intent += 1,
            Stage::Location => self.rejected_by_location += 1,
        }
    }
}

/// Read a JSON array of posts, as dumped by the scraper
pub fn load_posts(path: &Path) -> crate::Result<Vec<Post>> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        CampWatchError::validation(format!(
            "{} is not a JSON array of posts: {e}",
            path.display()
        ))
    })
}

/// Qualify every post in order and reply to the ones that pass
pub fn process_posts<S: CommentSink + ?Sized>(
    qualifier: &Qualifier,
    posts: &[Post],
    comment_text: &str,
    sink: &mut S,
) -> ScanSummary {
    let mut summary = ScanSummary::default();

    for (i, post) in posts.iter().enumerate() {
        summary.examined += 1;
        debug!(
            "Processing post {}/{} ({}): {}",
            i + 1,
            posts.len(),
            post.reference(),
            post.snippet(50)
        );

        let result = qualifier.qualify(&post.text);
        if let Some(stage) = result.failed_stage() {
            debug!("Post {} rejected at {} stage", post.reference(), stage);
            summary.record_rejection(stage);
            continue;
        }

        summary.qualified += 1;
        info!("Post {} matches all criteria: {}", post.reference(), result);

        match sink.submit(post, comment_text) {
            Ok(()) => summary.commented += 1,
            Err(e) => {
                warn!("Failed to comment on post {}: {:#}", post.reference(), e);
                summary.failed += 1;
            }
        }
    }

    summary
}
