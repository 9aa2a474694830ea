use serde::{Deserialize, Serialize};

use crate::{DEFAULT_TOKEN_KEY, Endpoint};

/// Client settings. Every field has a default, so a partial document
/// (or `{}`) deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for endpoint paths. Empty means same-origin proxy routes.
    pub api_base_url: String,
    /// Key the bearer token is stored under in the [`crate::TokenStore`].
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Full URL for `endpoint`, joined without a doubled `/`.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        format!("{base}{}", endpoint.path())
    }
}
