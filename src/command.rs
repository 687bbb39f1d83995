//! Command execution for Relman.
//!
//! Each command runs the preflight gate first, then executes its own
//! workflow against the forge:
//!
//! - **common**: forge construction, configuration loading, and the
//!   preflight gate shared by every command
//! - **info**: repository, latest release, and release branch details
//! - **stats**: release-cycle time aggregation
//! - **create_rc**: release candidate creation
//! - **promote_rc**: release candidate promotion
//! - **patch**: cherry-pick patching of the latest release

/// Shared functionality used across commands.
pub mod common;

/// Release candidate creation.
pub mod create_rc;

/// Repository and release details.
pub mod info;

/// Cherry-pick patching of the latest release.
pub mod patch;

/// Release candidate promotion.
pub mod promote_rc;

/// Release-cycle statistics.
pub mod stats;
