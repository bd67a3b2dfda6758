//! Remote playbook API configuration.
//!
//! Read from the environment:
//! - `PLAYBOOK_API_URL` - base URL of the remote API
//! - `PLAYBOOK_API_TIMEOUT_SECS` - request timeout in seconds
//! - `PLAYBOOK_API_TOKEN` - optional bearer token

use std::time::Duration;

/// Default base URL of the remote playbook API.
pub const DEFAULT_PLAYBOOK_API_URL: &str = "http://localhost:3000/api";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybookApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub auth_token: Option<String>,
}

impl PlaybookApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth_token: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_url =
            non_empty("PLAYBOOK_API_URL").unwrap_or_else(|| DEFAULT_PLAYBOOK_API_URL.to_string());

        let timeout_secs = match non_empty("PLAYBOOK_API_TIMEOUT_SECS") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_TIMEOUT_SECS,
                    "Invalid PLAYBOOK_API_TIMEOUT_SECS, using default"
                );
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            auth_token: non_empty("PLAYBOOK_API_TOKEN"),
        }
    }
}

impl Default for PlaybookApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYBOOK_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = PlaybookApiConfig::from_lookup(lookup(&[]));
        assert_eq!(config, PlaybookApiConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn reads_all_keys() {
        let config = PlaybookApiConfig::from_lookup(lookup(&[
            ("PLAYBOOK_API_URL", "https://team.example.com/api/"),
            ("PLAYBOOK_API_TIMEOUT_SECS", "5"),
            ("PLAYBOOK_API_TOKEN", "secret"),
        ]));
        assert_eq!(config.base_url, "https://team.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn bad_timeout_falls_back() {
        let config = PlaybookApiConfig::from_lookup(lookup(&[
            ("PLAYBOOK_API_TIMEOUT_SECS", "soon"),
            ("PLAYBOOK_API_TOKEN", "  "),
        ]));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.auth_token.is_none());
    }
}
