//! Shared request and response types for forge operations.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository metadata release workflows depend on.
#[derive(Debug, Clone)]
pub struct Repository {
    pub name: String,
    pub default_branch: String,
    /// Whether the authenticated user can push to the repository.
    pub push_permissions: bool,
}

/// Normalized GitHub release.
#[derive(Debug, Clone)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    pub name: Option<String>,
    pub prerelease: bool,
    pub html_url: String,
}

/// A branch resolved to its head commit.
#[derive(Debug, Clone)]
pub struct Branch {
    pub name: String,
    pub sha: String,
}

/// A tagged commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRef {
    pub tag_name: String,
    pub sha: String,
}

/// Commit metadata returned from the forge. A missing or unparsable
/// creation timestamp is represented as `None`, not an error.
#[derive(Debug, Clone)]
pub struct CommitMeta {
    pub sha: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
/// Request to create a new release.
pub struct CreateReleaseRequest {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub prerelease: bool,
    pub target_commitish: String,
}

#[derive(Debug, Clone)]
/// Request to update an existing release.
pub struct UpdateReleaseRequest {
    pub release_id: u64,
    pub tag_name: String,
    pub prerelease: bool,
    pub target_commitish: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
/// Request to replay a commit onto a release branch.
pub struct CherryPickRequest {
    pub branch: String,
    pub sha: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct Commit {
    pub sha: String,
}
