//! # OpenAPI Document Assembly
//!
//! Collects the utoipa-documented handlers into one document served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garage API",
        version = "0.1.0",
        description = "Personal vehicle records with session authentication and MOT/tax lookups.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::accounts::register,
        crate::routes::accounts::login,
        crate::routes::vehicles::list_vehicles,
        crate::routes::vehicles::create_vehicle,
        crate::routes::vehicles::update_vehicle,
        crate::routes::vehicles::delete_vehicle,
        crate::routes::mot::lookup_mot,
    ),
    components(schemas(
        garage_core::VehicleDetails,
        garage_core::InspectionStatus,
        crate::state::Vehicle,
        crate::error::ErrorBody,
        crate::routes::MessageResponse,
        crate::routes::accounts::CredentialsRequest,
        crate::routes::accounts::LoginResponse,
        crate::routes::mot::MotRequest,
    )),
    tags(
        (name = "accounts", description = "Registration and login"),
        (name = "vehicles", description = "Owner-scoped vehicle records"),
        (name = "mot", description = "Inspection registry lookups"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
