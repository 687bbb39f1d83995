//! Configuration for GitHub forge connections.
use secrecy::SecretString;

/// Default number of tags to inspect when collecting release statistics.
pub const DEFAULT_TAG_SEARCH_DEPTH: u64 = 400;

/// Default page size for paginated tag queries
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Remote repository connection configuration for authenticating and
/// interacting with the GitHub API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Full repository path.
    pub path: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Base URL for release links.
    pub release_link_base_url: String,
    /// Maximum number of tags fetched when paginating tag history.
    pub tag_search_depth: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            path: "".to_string(),
            token: SecretString::from("".to_string()),
            release_link_base_url: "".to_string(),
            tag_search_depth: DEFAULT_TAG_SEARCH_DEPTH,
        }
    }
}
