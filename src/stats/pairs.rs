//! Release statistics collection and the release/commit pair source.
use log::*;

use crate::{
    config::VersioningStrategy,
    forge::request::TagRef,
    stats::types::{ReleaseCommitPair, ReleaseCycle, ReleaseStats},
    tagging::{TagParts, TagType},
};

/// Group repository tags into release cycles keyed by base version.
///
/// Tags are expected newest first; cycle order and per-cycle tag order
/// both preserve that ordering. Tags that fit neither tag scheme, or that
/// belong to the other versioning strategy, are recorded as unmatched.
pub fn collect_release_stats(
    strategy: VersioningStrategy,
    tags: &[TagRef],
) -> ReleaseStats {
    let mut stats = ReleaseStats::default();

    for tag in tags {
        let Some(parts) = TagParts::parse(&tag.tag_name) else {
            debug!("tag does not fit any tag scheme: {}", tag.tag_name);
            stats.unmatched_tags.push(tag.tag_name.clone());
            continue;
        };

        if parts.version.strategy() != strategy {
            stats.unmatched_tags.push(tag.tag_name.clone());
            continue;
        }

        let base_version = parts.base_version();
        let index = match stats
            .releases
            .iter()
            .position(|cycle| cycle.base_version == base_version)
        {
            Some(index) => index,
            None => {
                stats.releases.push(ReleaseCycle {
                    base_version,
                    ..Default::default()
                });
                stats.releases.len() - 1
            }
        };

        match parts.tag_type {
            TagType::ReleaseCandidate => {
                stats.releases[index].candidates.push(tag.clone())
            }
            TagType::Release => {
                stats.releases[index].released.push(tag.clone())
            }
        }
    }

    stats
}

/// Produce the ordered pair list the aggregator consumes.
///
/// One pair per cycle that has at least one candidate: the cycle starts
/// at its earliest candidate and ends at its most recent released tag,
/// falling back to its most recent candidate when the cycle was never
/// promoted. Ordering follows the cycle order; no duplicates are
/// produced.
pub fn release_commit_pairs(stats: &ReleaseStats) -> Vec<ReleaseCommitPair> {
    stats
        .releases
        .iter()
        .filter_map(|cycle| {
            let start_commit = cycle.candidates.last()?.clone();
            let end_commit = cycle
                .released
                .first()
                .or_else(|| cycle.candidates.first())?
                .clone();

            Some(ReleaseCommitPair {
                base_version: cycle.base_version.clone(),
                start_commit,
                end_commit,
            })
        })
        .collect()
}
