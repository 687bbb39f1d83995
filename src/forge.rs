//! GitHub forge integration for release workflows.
//!
//! Provides token-based authentication, release and branch management,
//! and commit metadata lookups through a common trait.

/// Configuration for forge connections.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Shared request and response types for forge operations.
pub mod request;

/// Common trait for forge abstraction.
pub mod traits;
