//! Release candidate promotion command implementation.
use log::*;

use crate::{
    command::common,
    config::Config,
    error::{RelmanError, Result},
    forge::{request::UpdateReleaseRequest, traits::Forge},
    tagging::{TagParts, TagType},
};

/// Promote the latest release candidate to a full release by re-tagging
/// it and clearing the prerelease flag.
pub async fn execute(forge: &dyn Forge, config: &Config) -> Result<()> {
    let batch = common::preflight(forge, config).await?;

    let release = batch.latest_release.ok_or_else(|| {
        RelmanError::invalid_args(
            "no release candidate to promote: repository has no releases",
        )
    })?;

    if !release.prerelease {
        return Err(RelmanError::invalid_args(format!(
            "latest release {} is not a release candidate",
            release.tag_name
        )));
    }

    let parts = TagParts::parse(&release.tag_name)
        .ok_or_else(|| RelmanError::InvalidTagName(release.tag_name.clone()))?;

    if parts.tag_type != TagType::ReleaseCandidate {
        return Err(RelmanError::invalid_args(format!(
            "latest release {} is already promoted",
            release.tag_name
        )));
    }

    let promoted = TagParts {
        tag_type: TagType::Release,
        version: parts.version,
    };
    let tag_name = promoted.tag_name();

    info!("promoting {} to {}", release.tag_name, tag_name);

    let updated = forge
        .update_release(UpdateReleaseRequest {
            release_id: release.id,
            tag_name: tag_name.clone(),
            prerelease: false,
            target_commitish: None,
            body: Some(format!("Promoted from {}", release.tag_name)),
        })
        .await?;

    info!("promoted release {}: {}", tag_name, updated.html_url);

    Ok(())
}
