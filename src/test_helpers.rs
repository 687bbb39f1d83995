//! Common test helper functions shared across test modules.
use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::{
    forge::{
        config::RemoteConfig,
        request::{Branch, CommitMeta, Release, Repository, TagRef},
        traits::MockForge,
    },
    stats::types::ReleaseTime,
    tagging::TagParts,
};

/// Creates a test RemoteConfig with sensible defaults.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        scheme: "https".to_string(),
        owner: "test".to_string(),
        repo: "repo".to_string(),
        path: "test/repo".to_string(),
        token: SecretString::from("test-token".to_string()),
        release_link_base_url: "https://github.com/test/repo/releases/tag"
            .to_string(),
        tag_search_depth: 400,
    }
}

/// Creates a test Repository with push permissions.
pub fn create_test_repository() -> Repository {
    Repository {
        name: "repo".to_string(),
        default_branch: "main".to_string(),
        push_permissions: true,
    }
}

/// Creates a test Release for the given tag.
pub fn create_test_release(tag_name: &str, prerelease: bool) -> Release {
    Release {
        id: 1,
        tag_name: tag_name.to_string(),
        name: Some(tag_name.to_string()),
        prerelease,
        html_url: format!(
            "https://github.com/test/repo/releases/tag/{}",
            tag_name
        ),
    }
}

/// Creates a TagRef.
pub fn tag(tag_name: &str, sha: &str) -> TagRef {
    TagRef {
        tag_name: tag_name.to_string(),
        sha: sha.to_string(),
    }
}

/// Creates commit metadata with an optional RFC 3339 timestamp.
pub fn commit_meta(sha: &str, created_at: Option<&str>) -> CommitMeta {
    CommitMeta {
        sha: sha.to_string(),
        created_at: created_at.map(parse_timestamp),
    }
}

/// Parses an RFC 3339 timestamp.
pub fn parse_timestamp(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .unwrap()
        .with_timezone(&Utc)
}

/// Creates a ReleaseTime carrying only identity and fractional days.
pub fn release_time(version: &str, days_with_hours: f64) -> ReleaseTime {
    ReleaseTime {
        version: version.to_string(),
        days_with_hours,
        days: days_with_hours as i64,
        hours: 0,
        start_commit_created_at: None,
        end_commit_created_at: None,
    }
}

/// Sets preflight gate expectations on a mock forge: a repository with
/// push permissions, the given latest release, and its release branch
/// when `with_branch` is set.
pub fn expect_preflight(
    mock: &mut MockForge,
    latest_release: Option<Release>,
    with_branch: bool,
) {
    mock.expect_get_repository()
        .returning(|| Ok(create_test_repository()));

    let release = latest_release.clone();
    mock.expect_get_latest_release()
        .returning(move || Ok(release.clone()));

    if let Some(release) = latest_release
        && let Some(parts) = TagParts::parse(&release.tag_name)
    {
        let branch_name = format!("rc/{}", parts.base_version());
        mock.expect_get_branch()
            .withf(move |name| name == branch_name)
            .returning(move |name| {
                if with_branch {
                    Ok(Some(Branch {
                        name: name.to_string(),
                        sha: "branch-sha".to_string(),
                    }))
                } else {
                    Ok(None)
                }
            });
    }
}
