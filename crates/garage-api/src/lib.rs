//! # garage-api: Axum API for the Garage Vehicle Record Service
//!
//! Users register, log in for a 24 hour session token, and keep a private
//! list of vehicles that can be refreshed from the inspection registry.
//!
//! ## API Surface
//!
//! | Route | Module | Session |
//! |-------|--------|---------|
//! | `POST /api/register`, `POST /api/login` | [`routes::accounts`] | no |
//! | `GET/POST /api/vehicles`, `PUT/DELETE /api/vehicles/:id` | [`routes::vehicles`] | yes |
//! | `POST /api/mot` | [`routes::mot`] | yes |
//! | `GET /health/liveness`, `GET /health/readiness` | here | no |
//! | `GET /openapi.json` | [`openapi`] | no |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → OPTIONS 204 → CorsLayer → OPTIONS short-circuit → body limit → SessionMiddleware (protected routes) → Handler
//! ```

pub mod accounts;
pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod session;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Assemble the full application router with all routes and middleware.
///
/// Only the vehicle and MOT routes sit behind the session middleware;
/// accounts, health probes and the OpenAPI document are public.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(routes::vehicles::router())
        .merge(routes::mot::router())
        .route_layer(from_fn(auth::session_middleware));

    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(routes::accounts::router())
        .merge(protected)
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum::Extension(state.sessions.clone()))
        .with_state(state)
        .layer(from_fn(middleware::cors::short_circuit_options))
        .layer(middleware::cors::layer())
        .layer(from_fn(middleware::cors::preflight_no_content))
        .layer(middleware::tracing_layer::layer())
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the database answers, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match db::ping(&state.db).await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}
