//! Release-cycle statistics: tag grouping, the release/commit pair
//! source, and incremental release-time aggregation.

/// Incremental release-time aggregation with progress reporting.
pub mod aggregator;

/// Release statistics collection and the release/commit pair source.
pub mod pairs;

/// Data model for release statistics.
pub mod types;
