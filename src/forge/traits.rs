//! Traits related to the remote GitHub forge
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::request::{
        Branch, CherryPickRequest, Commit, CommitMeta,
        CreateReleaseRequest, Release, Repository, TagRef,
        UpdateReleaseRequest,
    },
};

/// Unified surface for the GitHub API operations release workflows use.
/// Mocked in tests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge {
    async fn get_repository(&self) -> Result<Repository>;
    async fn get_latest_release(&self) -> Result<Option<Release>>;
    async fn get_branch(&self, name: &str) -> Result<Option<Branch>>;
    async fn get_commit(&self, reference: &str) -> Result<CommitMeta>;
    async fn list_tags(&self) -> Result<Vec<TagRef>>;
    async fn create_branch(&self, name: &str, sha: &str) -> Result<()>;
    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<Release>;
    async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<Release>;
    async fn cherry_pick(&self, req: CherryPickRequest) -> Result<Commit>;
}
