//! Data model for release statistics.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::forge::request::TagRef;

/// An ordered association between two tagged commits bounding one release
/// cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCommitPair {
    pub base_version: String,
    pub start_commit: TagRef,
    pub end_commit: TagRef,
}

/// Elapsed wall-clock time between the two commits bounding a release
/// cycle.
///
/// When either timestamp is absent the duration fields are all zero while
/// the version identity remains populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseTime {
    pub version: String,
    pub days_with_hours: f64,
    pub days: i64,
    pub hours: i64,
    pub start_commit_created_at: Option<DateTime<Utc>>,
    pub end_commit_created_at: Option<DateTime<Utc>>,
}

impl ReleaseTime {
    /// Derive a record from a pair and its two resolved commit timestamps.
    pub fn derive(
        pair: &ReleaseCommitPair,
        start_commit_created_at: Option<DateTime<Utc>>,
        end_commit_created_at: Option<DateTime<Utc>>,
    ) -> Self {
        let mut release_time = Self {
            version: pair.base_version.clone(),
            days_with_hours: 0.0,
            days: 0,
            hours: 0,
            start_commit_created_at,
            end_commit_created_at,
        };

        if let (Some(start), Some(end)) =
            (start_commit_created_at, end_commit_created_at)
        {
            let elapsed = end.signed_duration_since(start);
            let days = elapsed.num_days();
            let hours = elapsed.num_hours() - days * 24;

            release_time.days = days;
            release_time.hours = hours;
            release_time.days_with_hours =
                days as f64 + hours as f64 / 24.0;
        }

        release_time
    }
}

/// One release cycle: every candidate and released tag sharing a base
/// version. Tag lists are ordered newest first, matching forge tag order.
#[derive(Debug, Clone, Default)]
pub struct ReleaseCycle {
    pub base_version: String,
    pub candidates: Vec<TagRef>,
    pub released: Vec<TagRef>,
}

/// Historical release statistics collected from repository tags.
#[derive(Debug, Clone, Default)]
pub struct ReleaseStats {
    pub releases: Vec<ReleaseCycle>,
    /// Tags that fit neither tag scheme, or the other versioning strategy.
    pub unmatched_tags: Vec<String>,
}
