//! # garage-enquiry-client -- Typed client for the vehicle-enquiry registry
//!
//! Looks up the inspection (MOT) and tax status of a vehicle by its
//! registration plate and maps the registry response onto
//! [`garage_core::InspectionStatus`].
//!
//! ## Call shape
//!
//! One `POST {base_url}/vehicle-enquiry/v1/vehicles` per lookup, with body
//! `{"registrationNumber": "<plate>"}` and the API key in `x-api-key`.
//! Every call is bounded by the configured timeout. Nothing is retried or
//! cached.
//!
//! ## Result contract
//!
//! | Registry answer | [`EnquiryClient::lookup`] returns |
//! |-----------------|-----------------------------------|
//! | 2xx + vehicle JSON | `Ok(Some(status))` |
//! | 404 | `Ok(None)` |
//! | other status | `Err(EnquiryError::ApiError)` |
//! | transport failure / timeout | `Err(EnquiryError::Http)` |
//! | undecodable body | `Err(EnquiryError::Deserialization)` |

pub mod config;
pub mod error;
pub mod vehicles;

pub use config::EnquiryConfig;
pub use error::EnquiryError;
pub use vehicles::{RegistryMotTest, RegistryVehicle};

use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

/// Registry path, relative to the base URL.
const VEHICLES_PATH: &str = "vehicle-enquiry/v1/vehicles";

/// Client for the vehicle-enquiry registry.
#[derive(Debug, Clone)]
pub struct EnquiryClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl EnquiryClient {
    /// Create a new client from configuration.
    pub fn new(config: EnquiryConfig) -> Result<Self, EnquiryError> {
        let mut api_key = HeaderValue::from_str(config.api_key.as_str())
            .map_err(|_| EnquiryError::Config(config::ConfigError::InvalidApiKey))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", api_key);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| EnquiryError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let endpoint = config.base_url.join(VEHICLES_PATH).map_err(|e| {
            EnquiryError::Config(config::ConfigError::InvalidUrl(
                config.base_url.to_string(),
                e.to_string(),
            ))
        })?;

        Ok(Self { http, endpoint })
    }

    /// Full URL that lookups are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}
