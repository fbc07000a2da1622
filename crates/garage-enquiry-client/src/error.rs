//! Vehicle-enquiry client error types.

/// Errors from registry calls.
#[derive(Debug, thiserror::Error)]
pub enum EnquiryError {
    /// HTTP transport error, including timeouts.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The registry returned a non-2xx status other than 404.
    #[error("registry {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl EnquiryError {
    /// Whether the failure was the request exceeding its timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http { source, .. } if source.is_timeout())
    }
}
