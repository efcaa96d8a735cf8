//! Client configuration.
//!
//! The host decides where configuration comes from. `ClientConfig` can be
//! deserialized from the host's own settings file or read from the
//! environment with `from_env`.

use serde::Deserialize;

use crate::error::ApiError;

/// Path prefix of the Logo Objects REST API on a server.
pub const DEFAULT_API_PATH: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Scheme, host and port of the Logo Objects server, e.g. `http://erp:32001`.
    pub base_url: String,
    #[serde(default = "default_api_path")]
    pub api_path: String,
}

fn default_api_path() -> String {
    DEFAULT_API_PATH.to_string()
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_path: default_api_path(),
        }
    }

    pub fn with_api_path(mut self, api_path: &str) -> Self {
        self.api_path = api_path.to_string();
        self
    }

    /// Read `LOGO_BASE_URL` (required) and `LOGO_API_PATH` (optional).
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup("LOGO_BASE_URL").ok_or(ApiError::MissingConfig("LOGO_BASE_URL"))?;
        let config = Self::new(&base_url);
        Ok(match lookup("LOGO_API_PATH") {
            Some(path) => config.with_api_path(&path),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_defaults_api_path() {
        let config: ClientConfig = serde_json::from_str(r#"{"base_url":"http://erp:32001"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("http://erp:32001"));
        assert_eq!(config.api_path, "/api/v1");
    }

    #[test]
    fn deserialize_explicit_api_path() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://erp","api_path":"/logo/api/v1"}"#).unwrap();
        assert_eq!(config.api_path, "/logo/api/v1");
    }

    #[test]
    fn lookup_requires_base_url() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ApiError::MissingConfig("LOGO_BASE_URL")));
    }

    #[test]
    fn lookup_reads_both_keys() {
        let config = ClientConfig::from_lookup(|key| match key {
            "LOGO_BASE_URL" => Some("http://erp".to_string()),
            "LOGO_API_PATH" => Some("/v2".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config, ClientConfig::new("http://erp").with_api_path("/v2"));
    }
}
