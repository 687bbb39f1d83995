//! CLI argument parsing and forge configuration.
use clap::{Parser, Subcommand};
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::env;

use crate::{
    config::VersioningStrategy,
    error::{RelmanError, Result},
    forge::config::{DEFAULT_TAG_SEARCH_DEPTH, RemoteConfig},
};

/// Global CLI arguments for forge configuration and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "", global = true)]
    /// GitHub repository URL (https://github.com/owner/repo).
    pub github_repo: String,

    #[arg(long, default_value = "", global = true)]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, value_enum, global = true)]
    /// Versioning strategy override for this invocation.
    pub versioning_strategy: Option<VersioningStrategy>,

    #[arg(long, default_value_t = DEFAULT_TAG_SEARCH_DEPTH, global = true)]
    /// Maximum number of tags to inspect. Use 0 for full history.
    pub tag_search_depth: u64,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release workflow subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show repository, latest release, and release branch details.
    Info,

    /// Compute elapsed time between release candidates and their releases.
    Stats {
        /// Emit a JSON document instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Create the next release candidate.
    CreateRc,

    /// Promote the latest release candidate to a full release.
    PromoteRc,

    /// Cherry-pick a commit onto the release branch and patch the latest
    /// release.
    Patch {
        /// Commit sha to cherry-pick.
        #[arg(long)]
        sha: String,
    },
}

impl Args {
    /// Configure remote repository connection from CLI arguments.
    pub fn get_remote(&self) -> Result<RemoteConfig> {
        let mut search_depth = self.tag_search_depth;

        if search_depth == 0 {
            search_depth = u64::MAX;
        }

        if self.github_repo.is_empty() {
            return Err(RelmanError::invalid_args(
                "must configure a github repo",
            ));
        }

        get_github_remote(search_depth, &self.github_repo, &self.github_token)
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(RelmanError::invalid_args(
            "only http and https schemes are supported for repo urls",
        )),
    }
}

/// Configure GitHub remote with URL parsing and token resolution.
fn get_github_remote(
    search_depth: u64,
    github_repo: &str,
    github_token: &str,
) -> Result<RemoteConfig> {
    let parsed = GitUrl::parse(github_repo)?;

    validate_scheme(parsed.scheme)?;

    let mut token = github_token.to_string();

    if token.is_empty()
        && let Some(parsed_token) = parsed.token
    {
        token = parsed_token;
    }

    if token.is_empty()
        && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
    {
        token = env_var_token;
    }

    if token.is_empty() {
        return Err(RelmanError::invalid_args("must set github token"));
    }

    let host = parsed.host.ok_or_else(|| {
        RelmanError::invalid_args("unable to parse host from github repo")
    })?;

    let owner = parsed.owner.ok_or_else(|| {
        RelmanError::invalid_args("unable to parse owner from github repo")
    })?;

    let project_path = parsed
        .path
        .strip_prefix("/")
        .ok_or_else(|| {
            RelmanError::invalid_args("failed to process project path")
        })?
        .to_string();

    let link_base_url = format!("{}://{}", parsed.scheme, host);

    let release_link_base_url =
        format!("{}/{}/{}/releases/tag", link_base_url, owner, parsed.name);

    Ok(RemoteConfig {
        host,
        scheme: parsed.scheme.to_string(),
        owner,
        repo: parsed.name,
        path: project_path,
        release_link_base_url,
        token: SecretString::from(token),
        tag_search_depth: search_depth,
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI argument parsing and remote configuration.
    use super::*;

    fn test_args(github_repo: &str, github_token: &str) -> Args {
        Args {
            debug: true,
            tag_search_depth: DEFAULT_TAG_SEARCH_DEPTH,
            versioning_strategy: None,
            github_repo: github_repo.into(),
            github_token: github_token.into(),
            command: Command::Info,
        }
    }

    /// Test GitHub remote configuration from CLI arguments.
    #[test]
    fn gets_github_remote() {
        let cli_config = test_args(
            "https://github.com/github_owner/github_repo",
            "github_token",
        );

        let result = cli_config.get_remote();
        assert!(result.is_ok());

        let remote = result.unwrap();

        assert_eq!(remote.host, "github.com");
        assert_eq!(remote.owner, "github_owner");
        assert_eq!(remote.repo, "github_repo");
        assert_eq!(remote.path, "github_owner/github_repo");
        assert_eq!(
            remote.release_link_base_url,
            "https://github.com/github_owner/github_repo/releases/tag"
        );
    }

    /// Test that only HTTP and HTTPS schemes are supported for repository
    /// URLs.
    #[test]
    fn only_supports_http_and_https_schemes() {
        let cli_config = test_args(
            "git@github.com:github_owner/github_repo",
            "github_token",
        );

        let result = cli_config.get_remote();
        assert!(result.is_err());
    }

    /// Test that a repository URL is required.
    #[test]
    fn requires_github_repo() {
        let cli_config = test_args("", "github_token");

        let result = cli_config.get_remote();
        assert!(result.is_err());
    }

    /// Test full-history tag search depth.
    #[test]
    fn zero_search_depth_means_full_history() {
        let mut cli_config = test_args(
            "https://github.com/github_owner/github_repo",
            "github_token",
        );
        cli_config.tag_search_depth = 0;

        let remote = cli_config.get_remote().unwrap();
        assert_eq!(remote.tag_search_depth, u64::MAX);
    }
}
