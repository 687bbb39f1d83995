//! Implements the Forge trait for Github
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::*;
use octocrab::{
    Octocrab, models::repos::Object, params::repos::Reference,
};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::cmp;

use crate::{
    error::{RelmanError, Result},
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{
            Branch, CherryPickRequest, Commit, CommitMeta,
            CreateReleaseRequest, Release, Repository, TagRef,
            UpdateReleaseRequest,
        },
        traits::Forge,
    },
};

const COMMIT_DATE_QUERY: &str = r#"
query GetCommitDate($owner: String!, $repo: String!, $sha: GitObjectID!) {
  repository(owner: $owner, name: $repo) {
    commit: object(oid: $sha) {
      ... on Commit {
        committedDate
      }
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct CommitDateObject {
    #[serde(rename = "committedDate")]
    pub committed_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitDateRepo {
    pub commit: Option<CommitDateObject>,
}

#[derive(Debug, Deserialize)]
struct CommitDateData {
    pub repository: CommitDateRepo,
}

#[derive(Debug, Deserialize)]
struct CommitDateResult {
    pub data: CommitDateData,
}

#[derive(Debug, Serialize)]
struct CommitDateVariables {
    pub owner: String,
    pub repo: String,
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct MergeCommitTree {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct MergeCommitDetail {
    pub tree: MergeCommitTree,
}

#[derive(Debug, Deserialize)]
struct MergeCommit {
    pub sha: String,
    pub commit: MergeCommitDetail,
}

/// GitHub forge implementation using Octocrab for API interactions with
/// releases, branches, tags, and commit metadata.
pub struct Github {
    config: RemoteConfig,
    base_uri: String,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and
    /// API base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = format!("{}://api.{}", config.scheme, config.host);
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri.clone())?;
        let instance = builder.build()?;

        Ok(Self {
            config,
            base_uri,
            instance,
        })
    }

    fn map_release(release: octocrab::models::repos::Release) -> Release {
        Release {
            id: release.id.0,
            tag_name: release.tag_name,
            name: release.name,
            prerelease: release.prerelease,
            html_url: release.html_url.to_string(),
        }
    }

    /// Merge a commit into a branch via the raw merges endpoint.
    async fn merge_into_branch(
        &self,
        branch: &str,
        sha: &str,
        message: &str,
    ) -> Result<MergeCommit> {
        let endpoint = format!(
            "{}/repos/{}/{}/merges",
            self.base_uri, self.config.owner, self.config.repo
        );

        let body = serde_json::json!({
          "base": branch.to_string(),
          "head": sha.to_string(),
          "commit_message": message.to_string(),
        });

        let merge: MergeCommit =
            self.instance.post(endpoint, Some(&body)).await?;

        info!("merged {} into {}: {}", sha, branch, merge.sha);

        Ok(merge)
    }

    async fn create_commit(
        &self,
        message: &str,
        parent_sha: &str,
        tree_sha: &str,
    ) -> Result<Commit> {
        let endpoint = format!(
            "{}/repos/{}/{}/git/commits",
            self.base_uri, self.config.owner, self.config.repo
        );

        let parents = serde_json::json!(vec![parent_sha.to_string()]);

        let body = serde_json::json!({
          "message": message.to_string(),
          "tree": tree_sha.to_string(),
          "parents": parents,
        });

        let commit: Commit = self.instance.post(endpoint, Some(&body)).await?;

        Ok(commit)
    }

    async fn force_branch_ref(&self, branch: &str, sha: &str) -> Result<()> {
        let endpoint = format!(
            "{}/repos/{}/{}/git/refs/heads/{}",
            self.base_uri, self.config.owner, self.config.repo, branch
        );

        let _: serde_json::Value = self
            .instance
            .patch(
                endpoint,
                Some(&serde_json::json!({
                  "sha": sha.to_string(),
                  "force": true
                })),
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Forge for Github {
    async fn get_repository(&self) -> Result<Repository> {
        let repo = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .get()
            .await?;

        let default_branch = repo.default_branch.ok_or_else(|| {
            RelmanError::forge(format!(
                "failed to find default branch for repo: {}",
                self.config.path
            ))
        })?;

        let push_permissions =
            repo.permissions.map(|p| p.push).unwrap_or(false);

        Ok(Repository {
            name: repo.name,
            default_branch,
            push_permissions,
        })
    }

    async fn get_latest_release(&self) -> Result<Option<Release>> {
        let page = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .list()
            .per_page(1)
            .send()
            .await?;

        Ok(page.items.into_iter().next().map(Self::map_release))
    }

    async fn get_branch(&self, name: &str) -> Result<Option<Branch>> {
        let result = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .get_ref(&Reference::Branch(name.to_string()))
            .await;

        match result {
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                info!("no branch found for name: {name}");
                Ok(None)
            }
            Err(err) => Err(err.into()),
            Ok(reference) => match reference.object {
                Object::Commit { sha, .. } => Ok(Some(Branch {
                    name: name.to_string(),
                    sha,
                })),
                _ => Err(RelmanError::forge(format!(
                    "failed to find sha for branch: {name}"
                ))),
            },
        }
    }

    async fn get_commit(&self, reference: &str) -> Result<CommitMeta> {
        let vars = CommitDateVariables {
            owner: self.config.owner.clone(),
            repo: self.config.repo.clone(),
            sha: reference.to_string(),
        };

        let json = serde_json::json!({
          "query": COMMIT_DATE_QUERY,
          "variables": vars,
        });

        let result: CommitDateResult = self.instance.graphql(&json).await?;

        let created_at = result
            .data
            .repository
            .commit
            .and_then(|commit| commit.committed_date)
            .and_then(|date| match DateTime::parse_from_rfc3339(&date) {
                Ok(parsed) => Some(parsed.with_timezone(&Utc)),
                Err(err) => {
                    warn!("unparsable commit date for {reference}: {err}");
                    None
                }
            });

        if created_at.is_none() {
            debug!("no commit date resolved for ref: {reference}");
        }

        Ok(CommitMeta {
            sha: reference.to_string(),
            created_at,
        })
    }

    async fn list_tags(&self) -> Result<Vec<TagRef>> {
        let depth = self.config.tag_search_depth as usize;
        let page_limit =
            cmp::min(DEFAULT_PAGE_SIZE as u64, self.config.tag_search_depth)
                as u8;

        let mut tags: Vec<TagRef> = vec![];
        let mut page_number = 1u32;

        loop {
            let page = self
                .instance
                .repos(&self.config.owner, &self.config.repo)
                .list_tags()
                .per_page(page_limit)
                .page(page_number)
                .send()
                .await?;

            if page.items.is_empty() {
                break;
            }

            for tag in page.items {
                tags.push(TagRef {
                    tag_name: tag.name,
                    sha: tag.commit.sha,
                });

                if tags.len() >= depth {
                    return Ok(tags);
                }
            }

            page_number += 1;
        }

        Ok(tags)
    }

    async fn create_branch(&self, name: &str, sha: &str) -> Result<()> {
        info!("creating branch {name} from {sha}");

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(
                &Reference::Branch(name.to_string()),
                sha.to_string(),
            )
            .await?;

        Ok(())
    }

    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<Release> {
        let release = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&req.tag_name)
            .name(&req.name)
            .body(&req.body)
            .target_commitish(&req.target_commitish)
            .draft(false)
            .prerelease(req.prerelease)
            .send()
            .await?;

        Ok(Self::map_release(release))
    }

    async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<Release> {
        let endpoint = format!(
            "{}/repos/{}/{}/releases/{}",
            self.base_uri, self.config.owner, self.config.repo, req.release_id
        );

        let mut body = serde_json::json!({
          "tag_name": req.tag_name,
          "prerelease": req.prerelease,
        });

        if let Some(target_commitish) = &req.target_commitish {
            body["target_commitish"] =
                serde_json::json!(target_commitish);
        }

        if let Some(release_body) = &req.body {
            body["body"] = serde_json::json!(release_body);
        }

        let release: octocrab::models::repos::Release =
            self.instance.patch(endpoint, Some(&body)).await?;

        Ok(Self::map_release(release))
    }

    async fn cherry_pick(&self, req: CherryPickRequest) -> Result<Commit> {
        let branch = self.get_branch(&req.branch).await?.ok_or_else(|| {
            RelmanError::forge(format!(
                "failed to find release branch: {}",
                req.branch
            ))
        })?;

        let merge = self
            .merge_into_branch(&req.branch, &req.sha, &req.message)
            .await?;

        // Rewrite the merge tree onto the old branch head so the result
        // is a single-parent commit, then move the branch to it.
        let commit = self
            .create_commit(&req.message, &branch.sha, &merge.commit.tree.sha)
            .await?;

        info!("created cherry-pick commit: {}", commit.sha);

        self.force_branch_ref(&req.branch, &commit.sha).await?;

        Ok(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_remote_config;

    #[tokio::test]
    async fn creates_client_from_remote_config() {
        let github = Github::new(create_test_remote_config());
        assert!(github.is_ok());
    }
}
