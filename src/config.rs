//! Client configuration: credentials, endpoint layout, and poll tuning

use std::fmt;
use std::time::Duration;

/// Basic-auth credentials for a Confluence instance.
///
/// The secret may be a password or a personal access token. Credentials are
/// immutable for the lifetime of a client.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

// Manual Debug so the secret never lands in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Which generation of the Confluence REST API to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    /// The current `/rest/api` endpoints
    #[default]
    Latest,
    /// The legacy prototype API shipped with Confluence 4.x
    V4,
}

/// Resolved endpoint layout for one Confluence instance.
///
/// Derived once at construction from the base URL and API version;
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    base_url: String,
    api_path: &'static str,
    extension: &'static str,
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>, version: ApiVersion) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let (api_path, extension) = match version {
            ApiVersion::Latest => ("/rest/api", ""),
            ApiVersion::V4 => ("/rest/prototype/latest", ".json"),
        };

        Self {
            base_url,
            api_path,
            extension,
        }
    }

    /// Instance root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute URL for a REST resource.
    ///
    /// `resource` is the path below the API prefix (e.g. `/content/123`);
    /// `query` is the pre-encoded query string without the leading `?`.
    pub fn resource_url(&self, resource: &str, query: &str) -> String {
        let mut url = format!(
            "{}{}{}{}",
            self.base_url, self.api_path, resource, self.extension
        );
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    /// Build an absolute URL for a non-REST path on the same instance
    /// (export kickoff pages, task polling, artifact downloads).
    pub fn site_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Timing knobs for the PDF export poll loop.
///
/// Defaults match the server-side rendering latency we see in practice:
/// 24 polls at 5-second spacing, roughly a two-minute budget. Tests inject
/// near-zero intervals and small attempt counts.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Pause between consecutive status polls
    pub interval: Duration,
    /// Maximum number of status polls before giving up
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 24,
        }
    }
}
