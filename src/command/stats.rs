//! Release statistics command implementation.
use log::*;

use crate::{
    command::common,
    config::Config,
    error::Result,
    forge::traits::Forge,
    stats::{
        aggregator::{ProgressLogger, ReleaseTimeAggregator},
        pairs,
        types::ReleaseTime,
    },
};

/// Aggregate release-cycle times and print them as a table or JSON.
pub async fn execute(
    forge: &dyn Forge,
    config: &Config,
    json: bool,
) -> Result<()> {
    common::preflight(forge, config).await?;

    let tags = forge.list_tags().await?;
    let stats = pairs::collect_release_stats(config.versioning_strategy, &tags);

    if !stats.unmatched_tags.is_empty() {
        debug!(
            "{} tags did not fit the {} tag scheme",
            stats.unmatched_tags.len(),
            config.versioning_strategy
        );
    }

    let release_pairs = pairs::release_commit_pairs(&stats);

    info!(
        "measuring {} release cycles across {} tags",
        release_pairs.len(),
        tags.len()
    );

    let mut aggregator = ReleaseTimeAggregator::new(forge, release_pairs);
    aggregator.subscribe(Box::new(ProgressLogger));
    aggregator.start().await?;

    if json {
        print_json(aggregator.release_times())?;
    } else {
        print_table(aggregator.release_times());
    }

    Ok(())
}

fn average_days_with_hours(times: &[ReleaseTime]) -> f64 {
    if times.is_empty() {
        return 0.0;
    }

    times.iter().map(|time| time.days_with_hours).sum::<f64>()
        / times.len() as f64
}

fn print_json(times: &[ReleaseTime]) -> Result<()> {
    let json = serde_json::json!({
        "release_times": times,
        "average_days_with_hours": average_days_with_hours(times),
    });

    println!("{}", serde_json::to_string_pretty(&json)?);

    Ok(())
}

fn print_table(times: &[ReleaseTime]) {
    if times.is_empty() {
        info!("no release cycles to measure");
        return;
    }

    println!(
        "{:<16} {:>6} {:>6} {:>12}",
        "version", "days", "hours", "days (frac)"
    );

    for time in times {
        println!(
            "{:<16} {:>6} {:>6} {:>12.2}",
            time.version, time.days, time.hours, time.days_with_hours
        );
    }

    println!(
        "average release time: {:.2} days",
        average_days_with_hours(times)
    );
}
