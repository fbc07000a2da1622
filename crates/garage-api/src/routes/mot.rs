//! # MOT Lookup API
//!
//! Looks a registration up in the inspection registry. When the request
//! names one of the caller's vehicles, the fresh status fields are written
//! onto it.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use garage_core::{InspectionStatus, ValidationError, VehicleId};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MotRequest {
    #[serde(default)]
    pub registration: String,
    /// Vehicle to update with the result. `0` or absent means no write-back.
    #[serde(default)]
    pub vehicle_id: Option<i64>,
}

impl MotRequest {
    fn target(&self) -> Result<Option<VehicleId>, ValidationError> {
        match self.vehicle_id {
            None | Some(0) => Ok(None),
            Some(raw) => VehicleId::new(raw).map(Some),
        }
    }
}

impl Validate for MotRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.registration.trim().is_empty() {
            return Err(ValidationError::EmptyRegistration);
        }
        self.target().map(|_| ())
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/mot", post(lookup_mot))
}

/// POST /api/mot: Fetch MOT and tax status for a registration.
#[utoipa::path(
    post,
    path = "/api/mot",
    request_body = MotRequest,
    responses(
        (status = 200, description = "Registry status", body = InspectionStatus),
        (status = 400, description = "Empty registration or bad vehicle id", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown registration or vehicle", body = crate::error::ErrorBody),
        (status = 502, description = "Registry unreachable or failed", body = crate::error::ErrorBody),
        (status = 503, description = "Registry not configured", body = crate::error::ErrorBody),
    ),
    tag = "mot"
)]
pub async fn lookup_mot(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    body: Result<Json<MotRequest>, JsonRejection>,
) -> Result<Json<InspectionStatus>, AppError> {
    let req = extract_validated_json(body)?;
    let target = req.target()?;
    let registration = req.registration.trim();

    let client = state.enquiry.as_ref().ok_or(AppError::LookupUnavailable)?;
    let status = client
        .lookup(registration)
        .await?
        .ok_or(AppError::NotFound("Registration not found"))?;

    if let Some(id) = target {
        let updated = db::vehicles::apply_status(&state.db, owner, id, &status)
            .await
            .map_err(AppError::persistence("Failed to update vehicle"))?;
        if !updated {
            return Err(AppError::NotFound("Vehicle not found"));
        }
        tracing::info!(user_id = %owner, vehicle_id = %id, "vehicle status refreshed");
    }

    Ok(Json(status))
}
