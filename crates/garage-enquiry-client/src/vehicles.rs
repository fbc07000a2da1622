//! Vehicle lookup against the registry.
//!
//! Fields use `Option` and `#[serde(default)]` because the live registry
//! omits fields it has no data for and occasionally sends explicit `null`.
//! `deny_unknown_fields` is intentionally not used.

use garage_core::InspectionStatus;
use serde::{Deserialize, Serialize};

use crate::error::EnquiryError;
use crate::EnquiryClient;

const ENDPOINT: &str = "POST /vehicle-enquiry/v1/vehicles";

/// Request body for a lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    registration_number: &'a str,
}

/// Vehicle as returned by the registry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryVehicle {
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tax_status: Option<String>,
    /// Top-level expiry reported by the current registry schema.
    #[serde(default)]
    pub mot_expiry_date: Option<String>,
    /// Inspection history, most recent first.
    #[serde(default)]
    pub mot_tests: Option<Vec<RegistryMotTest>>,
}

/// One entry of the inspection history.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryMotTest {
    #[serde(default)]
    pub expiry_date: Option<String>,
}

impl RegistryVehicle {
    /// Map the registry record onto the domain status fields.
    ///
    /// `mot_expiry` comes from the most recent inspection, falling back to
    /// the top-level `motExpiryDate`, and is empty when neither exists.
    pub fn into_status(self) -> InspectionStatus {
        let latest_test = self
            .mot_tests
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|test| test.expiry_date);
        let mot_expiry = latest_test
            .or(self.mot_expiry_date)
            .unwrap_or_default();

        let make_model = [self.make, self.model]
            .into_iter()
            .flatten()
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        InspectionStatus {
            mot_expiry,
            make_model,
            tax_status: self.tax_status.unwrap_or_default(),
        }
    }
}

impl EnquiryClient {
    /// Look up a vehicle by registration plate.
    ///
    /// Calls `POST {base_url}/vehicle-enquiry/v1/vehicles` once. Returns
    /// `Ok(None)` when the registry does not know the registration.
    pub async fn lookup(&self, registration: &str) -> Result<Option<InspectionStatus>, EnquiryError> {
        let body = LookupRequest {
            registration_number: registration,
        };

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| EnquiryError::Http {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(registration, "registry has no record for registration");
            return Ok(None);
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(EnquiryError::ApiError {
                endpoint: ENDPOINT.into(),
                status,
                body,
            });
        }

        let vehicle: RegistryVehicle =
            resp.json().await.map_err(|e| EnquiryError::Deserialization {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;

        Ok(Some(vehicle.into_status()))
    }
}
