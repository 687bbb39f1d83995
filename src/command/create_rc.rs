//! Release candidate creation command implementation.
use chrono::Utc;
use log::*;

use crate::{
    command::common,
    config::Config,
    error::{RelmanError, Result},
    forge::{request::CreateReleaseRequest, traits::Forge},
    tagging::{self, TagParts, TagType},
};

/// Create the next release candidate: a release branch cut from the
/// default branch head plus a prerelease carrying the candidate tag.
pub async fn execute(forge: &dyn Forge, config: &Config) -> Result<()> {
    let batch = common::preflight(forge, config).await?;

    let latest_parts = batch
        .latest_release
        .as_ref()
        .and_then(|release| TagParts::parse(&release.tag_name));

    let today = Utc::now().date_naive();
    let version = tagging::next_candidate(
        config.versioning_strategy,
        latest_parts.as_ref(),
        today,
    )?;

    let parts = TagParts {
        tag_type: TagType::ReleaseCandidate,
        version,
    };
    let tag_name = parts.tag_name();
    let branch_name = format!(
        "{}{}",
        config.release_branch_prefix,
        parts.base_version()
    );

    let default_branch = forge
        .get_branch(&batch.repository.default_branch)
        .await?
        .ok_or_else(|| {
            RelmanError::forge(format!(
                "failed to find default branch: {}",
                batch.repository.default_branch
            ))
        })?;

    info!(
        "creating release branch {} from {}",
        branch_name, default_branch.sha
    );
    forge.create_branch(&branch_name, &default_branch.sha).await?;

    let release = forge
        .create_release(CreateReleaseRequest {
            tag_name: tag_name.clone(),
            name: format!("Release candidate {}", parts.version),
            body: format!(
                "Release candidate based on {}",
                default_branch.sha
            ),
            prerelease: true,
            target_commitish: branch_name,
        })
        .await?;

    info!("created release candidate {}: {}", tag_name, release.html_url);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        forge::{request::Branch, traits::MockForge},
        test_helpers::*,
    };

    #[tokio::test]
    async fn creates_next_candidate_from_latest_release() {
        let mut mock = MockForge::new();

        mock.expect_get_repository()
            .returning(|| Ok(create_test_repository()));

        mock.expect_get_latest_release().returning(|| {
            Ok(Some(create_test_release("version-1.2.3", false)))
        });

        mock.expect_get_branch().returning(|name| {
            Ok(Some(Branch {
                name: name.to_string(),
                sha: "head-sha".to_string(),
            }))
        });

        mock.expect_create_branch()
            .withf(|name, sha| name == "rc/1.3" && sha == "head-sha")
            .returning(|_, _| Ok(()));

        mock.expect_create_release()
            .withf(|req| {
                req.tag_name == "rc-1.3.0"
                    && req.prerelease
                    && req.target_commitish == "rc/1.3"
            })
            .returning(|req| {
                Ok(create_test_release(&req.tag_name, req.prerelease))
            });

        let config = Config::default();
        let result = execute(&mock, &config).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn first_candidate_without_releases() {
        let mut mock = MockForge::new();

        mock.expect_get_repository()
            .returning(|| Ok(create_test_repository()));

        mock.expect_get_latest_release().returning(|| Ok(None));

        mock.expect_get_branch()
            .withf(|name| name == "main")
            .returning(|name| {
                Ok(Some(Branch {
                    name: name.to_string(),
                    sha: "head-sha".to_string(),
                }))
            });

        mock.expect_create_branch()
            .withf(|name, _| name == "rc/0.1")
            .returning(|_, _| Ok(()));

        mock.expect_create_release()
            .withf(|req| req.tag_name == "rc-0.1.0")
            .returning(|req| {
                Ok(create_test_release(&req.tag_name, req.prerelease))
            });

        let config = Config::default();
        let result = execute(&mock, &config).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn fails_when_default_branch_is_missing() {
        let mut mock = MockForge::new();

        mock.expect_get_repository()
            .returning(|| Ok(create_test_repository()));

        mock.expect_get_latest_release().returning(|| Ok(None));

        mock.expect_get_branch().returning(|_| Ok(None));

        let config = Config::default();
        let result = execute(&mock, &config).await;

        assert!(result.is_err());
    }
}
