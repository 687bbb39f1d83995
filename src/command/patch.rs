//! Patch command implementation.
use log::*;

use crate::{
    command::common,
    config::Config,
    error::{RelmanError, Result},
    forge::{
        request::{CherryPickRequest, UpdateReleaseRequest},
        traits::Forge,
    },
    tagging::TagParts,
};

/// Cherry-pick a commit onto the release branch and move the latest
/// release to the patched tag.
pub async fn execute(
    forge: &dyn Forge,
    config: &Config,
    sha: &str,
) -> Result<()> {
    let batch = common::preflight(forge, config).await?;

    let release = batch.latest_release.ok_or_else(|| {
        RelmanError::invalid_args(
            "nothing to patch: repository has no releases",
        )
    })?;

    let release_branch = batch.release_branch.ok_or_else(|| {
        RelmanError::invalid_args(
            "nothing to patch: repository has no release branch",
        )
    })?;

    let parts = TagParts::parse(&release.tag_name)
        .ok_or_else(|| RelmanError::InvalidTagName(release.tag_name.clone()))?;

    let patched = TagParts {
        tag_type: parts.tag_type,
        version: parts.version.bump_patch(),
    };
    let tag_name = patched.tag_name();

    info!("cherry-picking {} onto {}", sha, release_branch.name);

    let commit = forge
        .cherry_pick(CherryPickRequest {
            branch: release_branch.name.clone(),
            sha: sha.to_string(),
            message: format!(
                "[patch {}] cherry-pick {}",
                patched.version, sha
            ),
        })
        .await?;

    let updated = forge
        .update_release(UpdateReleaseRequest {
            release_id: release.id,
            tag_name: tag_name.clone(),
            prerelease: release.prerelease,
            target_commitish: Some(commit.sha.clone()),
            body: Some(format!("Patched with {}", sha)),
        })
        .await?;

    info!("patched release {}: {}", tag_name, updated.html_url);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        forge::{request::Commit, traits::MockForge},
        test_helpers::*,
    };

    #[tokio::test]
    async fn patches_latest_candidate() {
        let mut mock = MockForge::new();
        expect_preflight(
            &mut mock,
            Some(create_test_release("rc-1.2.3", true)),
            true,
        );

        mock.expect_cherry_pick()
            .withf(|req| req.branch == "rc/1.2" && req.sha == "fix-sha")
            .returning(|_| {
                Ok(Commit {
                    sha: "patched-sha".to_string(),
                })
            });

        mock.expect_update_release()
            .withf(|req| {
                req.tag_name == "rc-1.2.4"
                    && req.prerelease
                    && req.target_commitish.as_deref() == Some("patched-sha")
            })
            .returning(|req| {
                Ok(create_test_release(&req.tag_name, req.prerelease))
            });

        let config = Config::default();
        let result = execute(&mock, &config, "fix-sha").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn patches_promoted_release_with_version_tag() {
        let mut mock = MockForge::new();
        expect_preflight(
            &mut mock,
            Some(create_test_release("version-1.2.3", false)),
            true,
        );

        mock.expect_cherry_pick().returning(|_| {
            Ok(Commit {
                sha: "patched-sha".to_string(),
            })
        });

        mock.expect_update_release()
            .withf(|req| {
                req.tag_name == "version-1.2.4" && !req.prerelease
            })
            .returning(|req| {
                Ok(create_test_release(&req.tag_name, req.prerelease))
            });

        let config = Config::default();
        let result = execute(&mock, &config, "fix-sha").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn fails_without_release_branch() {
        let mut mock = MockForge::new();
        expect_preflight(
            &mut mock,
            Some(create_test_release("rc-1.2.3", true)),
            false,
        );

        let config = Config::default();
        let result = execute(&mock, &config, "fix-sha").await;

        assert!(result.is_err());
    }
}
