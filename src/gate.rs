//! Preflight gate for release workflows.
//!
//! Fetches the batch of repository state every workflow depends on and
//! validates the shared preconditions: push permissions, a latest-release
//! tag that fits a known tag scheme, and a tag scheme that matches the
//! configured versioning strategy.
use thiserror::Error;

use crate::{
    config::{Config, VersioningStrategy},
    error::Result,
    forge::{
        request::{Branch, Release, Repository},
        traits::Forge,
    },
    tagging::{self, TagParts},
};

/// Batched repository state fetched before any workflow runs.
#[derive(Debug, Clone)]
pub struct BatchInfo {
    pub repository: Repository,
    pub latest_release: Option<Release>,
    pub release_branch: Option<Branch>,
}

/// Precondition failures that abort a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateFailure {
    #[error("missing push permissions for repository \"{0}\"")]
    MissingPushPermissions(String),

    #[error("{title}: {subtitle}")]
    InvalidTagName { title: String, subtitle: String },
}

/// Conditions worth surfacing that do not block a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateWarning {
    #[error("versioning mismatch: expected a {expected} version, got \"{tag}\"")]
    VersioningMismatch {
        expected: VersioningStrategy,
        tag: String,
    },

    #[error("repository doesn't have any releases yet")]
    NoReleases,

    #[error("repository doesn't have any release branches")]
    NoReleaseBranch,
}

/// Outcome of evaluating the gate against batch info.
#[derive(Debug, Clone, Default)]
pub struct GateReport {
    pub failures: Vec<GateFailure>,
    pub warnings: Vec<GateWarning>,
}

impl GateReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch repository metadata and the latest release concurrently, then
/// resolve the release branch for the latest release's base version.
pub async fn fetch_batch_info(
    forge: &dyn Forge,
    config: &Config,
) -> Result<BatchInfo> {
    let (repository, latest_release) = tokio::try_join!(
        forge.get_repository(),
        forge.get_latest_release(),
    )?;

    let release_branch = match &latest_release {
        Some(release) => match TagParts::parse(&release.tag_name) {
            Some(parts) => {
                let name = format!(
                    "{}{}",
                    config.release_branch_prefix,
                    parts.base_version()
                );
                forge.get_branch(&name).await?
            }
            None => None,
        },
        None => None,
    };

    Ok(BatchInfo {
        repository,
        latest_release,
        release_branch,
    })
}

/// Evaluate workflow preconditions against the fetched batch info.
pub fn evaluate(config: &Config, batch: &BatchInfo) -> GateReport {
    let mut report = GateReport::default();

    if !batch.repository.push_permissions {
        report.failures.push(GateFailure::MissingPushPermissions(
            batch.repository.name.clone(),
        ));
    }

    match &batch.latest_release {
        Some(release) => {
            if let Some(error) = tagging::validate_tag_name(&release.tag_name)
            {
                report.failures.push(GateFailure::InvalidTagName {
                    title: error.title,
                    subtitle: error.subtitle,
                });
            } else if !tagging::matches_strategy(
                config.versioning_strategy,
                &release.tag_name,
            ) {
                report.warnings.push(GateWarning::VersioningMismatch {
                    expected: config.versioning_strategy,
                    tag: release.tag_name.clone(),
                });
            }
        }
        None => report.warnings.push(GateWarning::NoReleases),
    }

    if batch.release_branch.is_none() {
        report.warnings.push(GateWarning::NoReleaseBranch);
    }

    report
}
