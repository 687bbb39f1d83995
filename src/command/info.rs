//! Info command implementation.
use log::*;

use crate::{
    command::common, config::Config, error::Result, forge::traits::Forge,
};

/// Show repository, latest release, and release branch details.
pub async fn execute(forge: &dyn Forge, config: &Config) -> Result<()> {
    let batch = common::preflight(forge, config).await?;

    info!("repository: {}", batch.repository.name);
    info!("default branch: {}", batch.repository.default_branch);

    match &batch.latest_release {
        Some(release) => {
            if release.prerelease {
                info!(
                    "latest release: {} (release candidate)",
                    release.tag_name
                );
            } else {
                info!("latest release: {}", release.tag_name);
            }
            info!("release link: {}", release.html_url);
        }
        None => info!("latest release: none"),
    }

    match &batch.release_branch {
        Some(branch) => info!("release branch: {}", branch.name),
        None => info!("release branch: none"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{forge::traits::MockForge, test_helpers::*};

    #[tokio::test]
    async fn shows_repository_details() {
        let mut mock = MockForge::new();
        expect_preflight(
            &mut mock,
            Some(create_test_release("version-1.2.3", false)),
            true,
        );

        let config = Config::default();
        let result = execute(&mock, &config).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn shows_details_without_releases() {
        let mut mock = MockForge::new();
        expect_preflight(&mut mock, None, false);

        let config = Config::default();
        let result = execute(&mock, &config).await;

        assert!(result.is_ok());
    }
}
