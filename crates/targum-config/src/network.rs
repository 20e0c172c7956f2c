use std::env;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Characters `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn default_base_url() -> String {
    "https://www.morfix.co.il".to_string()
}

fn default_timeout_ms() -> u64 {
    10000
}

fn default_user_agent() -> String {
    concat!("targumchik/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Dictionary site root, lookups go to `{base_url}/{query}`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Single attempt budget for one page fetch
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        let base_url = env::var("TARGUM_BASE_URL").unwrap_or(defaults.base_url);

        let timeout_ms = env::var("TARGUM_FETCH_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_ms);

        Self {
            base_url,
            timeout_ms,
            user_agent: defaults.user_agent,
        }
    }

    /// Result page for `query`
    pub fn page_url(&self, query: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            utf8_percent_encode(query, URI_COMPONENT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_encodes_like_uri_component() {
        let config = NetworkConfig {
            base_url: "https://www.morfix.co.il/".to_string(),
            ..NetworkConfig::default()
        };

        assert_eq!(config.page_url("dog"), "https://www.morfix.co.il/dog");
        assert_eq!(
            config.page_url("hot dog's (snack)"),
            "https://www.morfix.co.il/hot%20dog's%20(snack)"
        );
        assert_eq!(config.page_url("a/b?c"), "https://www.morfix.co.il/a%2Fb%3Fc");
    }
}
