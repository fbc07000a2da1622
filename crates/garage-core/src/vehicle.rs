//! Vehicle record fields.
//!
//! All fields are free text. Dates are kept in whatever representation the
//! client or the inspection registry supplied; nothing here parses them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The mutable fields of a vehicle record.
///
/// Every field defaults to the empty string when absent from a request body,
/// and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleDetails {
    /// Registration plate.
    pub registration: String,
    /// Make and model, e.g. `Ford Focus`.
    pub make_model: String,
    /// MOT (inspection) expiry date.
    pub mot_expiry: String,
    /// Vehicle tax status, e.g. `Taxed`.
    pub tax_status: String,
    /// Insurance expiry date.
    pub insurance_expiry: String,
    /// Next service date.
    pub next_service: String,
}

/// Status fields obtained from the inspection registry.
///
/// This is the subset of [`VehicleDetails`] that a registry lookup can
/// refresh on an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InspectionStatus {
    /// MOT expiry date; empty when the registry has no inspection history.
    pub mot_expiry: String,
    /// `<make> <model>` as reported by the registry.
    pub make_model: String,
    /// Tax status as reported by the registry.
    pub tax_status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let details: VehicleDetails =
            serde_json::from_str(r#"{"registration":"AB12CDE"}"#).unwrap();
        assert_eq!(details.registration, "AB12CDE");
        assert_eq!(details.make_model, "");
        assert_eq!(details.next_service, "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let details: VehicleDetails =
            serde_json::from_str(r#"{"id": 9, "makeModel":"Ford Focus","colour":"red"}"#)
                .unwrap();
        assert_eq!(details.make_model, "Ford Focus");
    }

    #[test]
    fn serializes_camel_case() {
        let details = VehicleDetails {
            mot_expiry: "2025-01-01".into(),
            ..VehicleDetails::default()
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["motExpiry"], "2025-01-01");
        assert!(json.get("mot_expiry").is_none());
    }
}
