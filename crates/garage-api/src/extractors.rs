//! # Custom Extractors & Validation
//!
//! Handlers take `Result<Json<T>, JsonRejection>` and `Result<Path<_>, PathRejection>`
//! rather than the bare extractors, so that rejections come back in the
//! service's own error shape instead of axum's plain-text bodies.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use garage_core::{ValidationError, VehicleId};

use crate::error::AppError;

/// Request types with rules beyond what deserialization checks.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Extract a JSON body, mapping rejections to [`AppError::InvalidInput`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::InvalidInput(err.body_text()))
}

/// Extract a JSON body and run [`Validate::validate`] on it.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate()?;
    Ok(value)
}

/// Extract a vehicle id path segment. Non-numeric, zero and negative ids are
/// all invalid input.
pub fn extract_vehicle_id(result: Result<Path<i64>, PathRejection>) -> Result<VehicleId, AppError> {
    let Path(raw) = result.map_err(|err| AppError::InvalidInput(err.body_text()))?;
    Ok(VehicleId::new(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Plate {
        registration: String,
    }

    impl Validate for Plate {
        fn validate(&self) -> Result<(), ValidationError> {
            if self.registration.trim().is_empty() {
                return Err(ValidationError::EmptyRegistration);
            }
            Ok(())
        }
    }

    #[test]
    fn validated_json_passes_good_input() {
        let plate = extract_validated_json(Ok(Json(Plate {
            registration: "AB12CDE".into(),
        })))
        .unwrap();
        assert_eq!(plate.registration, "AB12CDE");
    }

    #[test]
    fn validated_json_rejects_bad_input() {
        let err = extract_validated_json(Ok(Json(Plate {
            registration: "  ".into(),
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn vehicle_id_must_be_positive() {
        assert_eq!(extract_vehicle_id(Ok(Path(3))).unwrap(), VehicleId::from_db(3));
        assert!(matches!(
            extract_vehicle_id(Ok(Path(0))),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            extract_vehicle_id(Ok(Path(-4))),
            Err(AppError::InvalidInput(_))
        ));
    }
}
