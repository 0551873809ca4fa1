//! Codex provider configuration.

use serde::Deserialize;

/// Connection settings for the Codex GraphQL API.
#[derive(Debug, Clone, Deserialize)]
pub struct CodexConfig {
    /// GraphQL endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_api_url() -> String {
    "https://api.codex.io/graphql".into()
}

fn default_api_key_env() -> String {
    "CODEX_API_KEY".into()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl Default for CodexConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key_env: default_api_key_env(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl CodexConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Blank values count as missing.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}
