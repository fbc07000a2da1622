//! Vehicle-enquiry client configuration.
//!
//! The base URL defaults to the production registry. The API key has no
//! default: a deployment without `MOT_API_KEY` simply has no lookup client.

use std::time::Duration;

use url::Url;
use zeroize::Zeroizing;

/// Production base URL of the vehicle-enquiry registry.
pub const DEFAULT_BASE_URL: &str = "https://driver-vehicle-licensing.api.gov.uk";

/// Default bound on a single registry call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for connecting to the registry.
///
/// Custom `Debug` implementation redacts the `api_key` field.
#[derive(Clone)]
pub struct EnquiryConfig {
    /// Base URL of the registry. Always ends with `/`.
    pub base_url: Url,
    /// Static API key sent as `x-api-key`.
    pub api_key: Zeroizing<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for EnquiryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnquiryConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EnquiryConfig {
    /// Build a configuration with the default timeout.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            api_key: Zeroizing::new(api_key.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `MOT_API_KEY` (required)
    /// - `MOT_API_URL` (default: `https://driver-vehicle-licensing.api.gov.uk`)
    /// - `MOT_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source, using the
    /// same variable names as [`EnquiryConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("MOT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let raw_url = lookup("MOT_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("MOT_API_URL".to_string(), e.to_string()))?;

        let timeout = match lookup("MOT_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            ),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self::new(base_url, api_key).with_timeout(timeout))
    }
}

/// Relative paths are joined onto the base, so the base must end in `/`
/// or its last segment would be replaced.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MOT_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("MOT_API_KEY contains characters that are not allowed in an HTTP header")]
    InvalidApiKey,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("MOT_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn lookup_without_key_is_missing() {
        let err = EnquiryConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        let err = EnquiryConfig::from_lookup(lookup_from(&[("MOT_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn lookup_applies_defaults() {
        let cfg = EnquiryConfig::from_lookup(lookup_from(&[("MOT_API_KEY", "k")])).unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://driver-vehicle-licensing.api.gov.uk/");
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
        assert_eq!(cfg.api_key.as_str(), "k");
    }

    #[test]
    fn lookup_reads_overrides() {
        let cfg = EnquiryConfig::from_lookup(lookup_from(&[
            ("MOT_API_KEY", "k"),
            ("MOT_API_URL", "http://127.0.0.1:9000"),
            ("MOT_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }

    #[test]
    fn lookup_rejects_bad_timeout_and_url() {
        let err = EnquiryConfig::from_lookup(lookup_from(&[
            ("MOT_API_KEY", "k"),
            ("MOT_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));

        let err = EnquiryConfig::from_lookup(lookup_from(&[
            ("MOT_API_KEY", "k"),
            ("MOT_API_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(..)));
    }

    #[test]
    fn new_applies_default_timeout() {
        let cfg = EnquiryConfig::new(Url::parse("http://127.0.0.1:9000").unwrap(), "k");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.api_key.as_str(), "k");
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let cfg = EnquiryConfig::new(Url::parse("http://127.0.0.1:9000/prefix").unwrap(), "k");
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/prefix/");
        let joined = cfg.base_url.join("vehicle-enquiry/v1/vehicles").unwrap();
        assert_eq!(
            joined.as_str(),
            "http://127.0.0.1:9000/prefix/vehicle-enquiry/v1/vehicles"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = EnquiryConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap(), "super-secret");
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn with_timeout_overrides() {
        let cfg = EnquiryConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap(), "k")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(cfg.timeout, Duration::from_millis(250));
    }
}
