//! Client configuration and its defaults.

use std::collections::HashMap;
use std::fmt;

use crate::Error;

/// Production API endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.documentstack.dev";

/// Request timeout applied when the configured timeout is zero.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_KEY: &str = "DOCUMENTSTACK_API_KEY";
const ENV_BASE_URL: &str = "DOCUMENTSTACK_BASE_URL";
const ENV_TIMEOUT: &str = "DOCUMENTSTACK_TIMEOUT";
const ENV_DEBUG: &str = "DOCUMENTSTACK_DEBUG";

/// Configuration for [`crate::Client`].
///
/// Empty or zero fields are replaced with defaults when the client is
/// constructed; see [`Config::resolve`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// API key sent as a Bearer token. Required.
    pub api_key: String,
    /// Base URL of the API. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Request timeout in seconds. Defaults to [`DEFAULT_TIMEOUT_SECS`].
    pub timeout_secs: u64,
    /// Extra headers sent with every request. These replace the default
    /// `Content-Type` and `Authorization` headers when the names match.
    pub headers: HashMap<String, String>,
    /// Emit request and response events to the client's debug sink.
    pub debug: bool,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builds a config from `DOCUMENTSTACK_*` environment variables.
    ///
    /// A missing API key is not an error here; [`crate::Client::new`]
    /// rejects it. Unparseable timeout or debug values are.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::new(lookup(ENV_API_KEY).unwrap_or_default());
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_DEBUG) {
            config.debug = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "" | "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(Error::Config(format!(
                        "{} must be a boolean, got {:?}",
                        ENV_DEBUG, raw
                    )))
                }
            };
        }
        Ok(config)
    }

    /// Validates the API key and fills in defaults.
    pub(crate) fn resolve(mut self) -> Result<Self, Error> {
        if self.api_key.is_empty() {
            return Err(Error::Config("API key is required".to_string()));
        }
        if self.base_url.is_empty() {
            self.base_url = DEFAULT_BASE_URL.to_string();
        }
        if let Some(stripped) = self.base_url.strip_suffix('/') {
            self.base_url = stripped.to_string();
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        Ok(self)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("headers", &self.headers)
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        let err = Config::new("").resolve().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), "configuration error: API key is required");
    }

    #[test]
    fn defaults_fill_empty_fields() {
        let config = Config::new("key").resolve().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.headers.is_empty());
        assert!(!config.debug);
    }

    #[test]
    fn explicit_values_are_kept() {
        let config = Config::new("key")
            .with_base_url("http://localhost:8080")
            .with_timeout(5)
            .with_header("X-Team", "billing")
            .with_debug(true)
            .resolve()
            .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.headers.get("X-Team").map(String::as_str), Some("billing"));
        assert!(config.debug);
    }

    #[test]
    fn trailing_slash_is_stripped_once() {
        let config = Config::new("key").with_base_url("https://x/").resolve().unwrap();
        assert_eq!(config.base_url, "https://x");

        let config = Config::new("key").with_base_url("https://x").resolve().unwrap();
        assert_eq!(config.base_url, "https://x");

        let config = Config::new("key").with_base_url("https://x//").resolve().unwrap();
        assert_eq!(config.base_url, "https://x/");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", Config::new("secret-key"));
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let config = Config::from_lookup(|name| match name {
            "DOCUMENTSTACK_API_KEY" => Some("env-key".to_string()),
            "DOCUMENTSTACK_BASE_URL" => Some("http://127.0.0.1:9000/".to_string()),
            "DOCUMENTSTACK_TIMEOUT" => Some("12".to_string()),
            "DOCUMENTSTACK_DEBUG" => Some("true".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/");
        assert_eq!(config.timeout_secs, 12);
        assert!(config.debug);
    }

    #[test]
    fn from_lookup_missing_key_is_empty() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(config.api_key.is_empty());
        assert!(config.resolve().is_err());
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = Config::from_lookup(|name| {
            (name == "DOCUMENTSTACK_TIMEOUT").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("DOCUMENTSTACK_TIMEOUT")));
    }

    #[test]
    fn from_lookup_rejects_bad_debug_flag() {
        let err = Config::from_lookup(|name| {
            (name == "DOCUMENTSTACK_DEBUG").then(|| "maybe".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
