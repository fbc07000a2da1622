//! # Vehicles API
//!
//! CRUD over the caller's own vehicles. A vehicle id that does not exist and
//! one that belongs to somebody else both answer 404.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use garage_core::VehicleDetails;

use crate::auth::CurrentUser;
use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_vehicle_id};
use crate::routes::MessageResponse;
use crate::state::{AppState, Vehicle};

const NOT_FOUND: &str = "Vehicle not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/api/vehicles/:id", put(update_vehicle).delete(delete_vehicle))
}

/// GET /api/vehicles: List the caller's vehicles.
#[utoipa::path(
    get,
    path = "/api/vehicles",
    responses(
        (status = 200, description = "Caller's vehicles in insertion order", body = Vec<Vehicle>),
        (status = 401, description = "Missing or invalid session", body = crate::error::ErrorBody),
    ),
    tag = "vehicles"
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = db::vehicles::list(&state.db, owner)
        .await
        .map_err(AppError::persistence("Failed to load vehicles"))?;
    Ok(Json(vehicles))
}

/// POST /api/vehicles: Add a vehicle.
#[utoipa::path(
    post,
    path = "/api/vehicles",
    request_body = VehicleDetails,
    responses(
        (status = 200, description = "Vehicle stored", body = MessageResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid session", body = crate::error::ErrorBody),
    ),
    tag = "vehicles"
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    body: Result<Json<VehicleDetails>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let details = extract_json(body)?;

    let id = db::vehicles::insert(&state.db, owner, &details)
        .await
        .map_err(AppError::persistence("Failed to add vehicle"))?;
    tracing::info!(user_id = %owner, vehicle_id = %id, "vehicle added");

    Ok(Json(MessageResponse::new("Vehicle added")))
}

/// PUT /api/vehicles/{id}: Replace a vehicle's fields.
#[utoipa::path(
    put,
    path = "/api/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle ID")),
    request_body = VehicleDetails,
    responses(
        (status = 200, description = "Vehicle updated", body = MessageResponse),
        (status = 400, description = "Malformed body or id", body = crate::error::ErrorBody),
        (status = 404, description = "No such vehicle for this caller", body = crate::error::ErrorBody),
    ),
    tag = "vehicles"
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<VehicleDetails>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = extract_vehicle_id(path)?;
    let details = extract_json(body)?;

    let updated = db::vehicles::update(&state.db, owner, id, &details)
        .await
        .map_err(AppError::persistence("Failed to update vehicle"))?;
    if !updated {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    tracing::info!(user_id = %owner, vehicle_id = %id, "vehicle updated");
    Ok(Json(MessageResponse::new("Vehicle updated")))
}

/// DELETE /api/vehicles/{id}: Remove a vehicle.
#[utoipa::path(
    delete,
    path = "/api/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 404, description = "No such vehicle for this caller", body = crate::error::ErrorBody),
    ),
    tag = "vehicles"
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = extract_vehicle_id(path)?;

    let deleted = db::vehicles::delete(&state.db, owner, id)
        .await
        .map_err(AppError::persistence("Failed to delete vehicle"))?;
    if !deleted {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    tracing::info!(user_id = %owner, vehicle_id = %id, "vehicle deleted");
    Ok(Json(MessageResponse::new("Vehicle deleted")))
}
