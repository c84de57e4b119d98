use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Where the catalog service lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme, host and port of the catalog service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix every route is mounted under.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Route segment for paged searches (`{route}/{page}/{terms...}`).
    #[serde(default = "default_search_route")]
    pub search_route: String,

    /// Per-request timeout; an expired request is an ordinary fetch failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:7600".to_string()
}

fn default_api_prefix() -> String {
    "/api/1".to_string()
}

fn default_search_route() -> String {
    "search".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            search_route: default_search_route(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.base_url
            ));
        }
        if self.search_route.trim_matches('/').is_empty() {
            return Err("search_route must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be > 0".to_string());
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `base_url` and `api_prefix` joined, without a trailing slash.
    pub(crate) fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }
}
