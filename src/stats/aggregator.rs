//! Incremental release-time aggregation.
//!
//! Resolves each release/commit pair's elapsed duration one pair at a
//! time, in input order, and reports fractional progress to subscribed
//! observers. Within one step the two commit timestamp fetches run
//! concurrently and the step joins both; across steps execution is
//! strictly sequential, so results always append in increasing index
//! order.
use log::*;
use std::cmp;

use crate::{
    error::Result,
    forge::traits::Forge,
    stats::types::{ReleaseCommitPair, ReleaseTime},
};

/// Notifications emitted while aggregation advances. Any host can
/// subscribe: a terminal, a web view, or a log line.
pub trait StatsObserver {
    /// A release-time record was appended to the accumulated sequence.
    fn record_appended(&mut self, record: &ReleaseTime);

    /// The completion percentage changed.
    fn progress_changed(&mut self, percent: u8);
}

/// Observer that reports progress through the log.
#[derive(Debug, Default)]
pub struct ProgressLogger;

impl StatsObserver for ProgressLogger {
    fn record_appended(&mut self, record: &ReleaseTime) {
        info!(
            "release {}: {} days {} hours",
            record.version, record.days, record.hours
        );
    }

    fn progress_changed(&mut self, percent: u8) {
        info!("aggregating release times: {percent}%");
    }
}

/// Completion percentage, clamped to [0, 100]. Zero of zero is complete
/// by definition.
pub fn progress(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }

    let percent = ((completed as f64 / total as f64) * 100.0).round() as u64;

    cmp::min(percent, 100) as u8
}

/// Resolves elapsed durations for an ordered list of release/commit
/// pairs without re-fetching completed entries.
pub struct ReleaseTimeAggregator<'a> {
    forge: &'a dyn Forge,
    pairs: Vec<ReleaseCommitPair>,
    completed: Vec<ReleaseTime>,
    observers: Vec<Box<dyn StatsObserver>>,
    last_progress: Option<u8>,
}

impl<'a> ReleaseTimeAggregator<'a> {
    pub fn new(forge: &'a dyn Forge, pairs: Vec<ReleaseCommitPair>) -> Self {
        Self {
            forge,
            pairs,
            completed: vec![],
            observers: vec![],
            last_progress: None,
        }
    }

    /// Subscribe an observer to aggregation notifications.
    pub fn subscribe(&mut self, observer: Box<dyn StatsObserver>) {
        self.observers.push(observer);
    }

    /// Accumulated records, in input pair order.
    pub fn release_times(&self) -> &[ReleaseTime] {
        &self.completed
    }

    /// Completion percentage for the current accumulated state.
    pub fn progress(&self) -> u8 {
        progress(self.completed.len(), self.pairs.len())
    }

    pub fn is_complete(&self) -> bool {
        self.completed.len() == self.pairs.len()
    }

    /// Run aggregation to completion from the first unresolved index.
    ///
    /// A no-op once complete: no further fetches are issued. On a fetch
    /// failure the accumulated sequence keeps every record resolved so
    /// far and the next call resumes at the failed index.
    pub async fn start(&mut self) -> Result<()> {
        self.notify_progress();

        while !self.is_complete() {
            self.step().await?;
        }

        Ok(())
    }

    /// Resolve the next unresolved pair and append its record.
    async fn step(&mut self) -> Result<()> {
        let pair = self.pairs[self.completed.len()].clone();

        debug!(
            "resolving release times for {}: {} -> {}",
            pair.base_version, pair.start_commit.tag_name,
            pair.end_commit.tag_name
        );

        let (start, end) = tokio::try_join!(
            self.forge.get_commit(&pair.start_commit.sha),
            self.forge.get_commit(&pair.end_commit.sha),
        )?;

        let record =
            ReleaseTime::derive(&pair, start.created_at, end.created_at);
        self.completed.push(record);

        if let Some(record) = self.completed.last() {
            for observer in self.observers.iter_mut() {
                observer.record_appended(record);
            }
        }

        self.notify_progress();

        Ok(())
    }

    fn notify_progress(&mut self) {
        let percent = self.progress();

        if self.last_progress == Some(percent) {
            return;
        }

        self.last_progress = Some(percent);

        for observer in self.observers.iter_mut() {
            observer.progress_changed(percent);
        }
    }
}
