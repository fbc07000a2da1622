//! # Accounts API
//!
//! Public endpoints: registration and login. Login hands back a session
//! token for the protected routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use garage_core::Credentials;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::accounts::{self, AccountError};
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::routes::MessageResponse;
use crate::state::AppState;

/// Body of both `/api/register` and `/api/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsRequest {
    fn into_credentials(self) -> Result<Credentials, AppError> {
        Ok(Credentials::try_from_parts(&self.username, &self.password)?)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Session token; send it back in the `Authorization` header.
    pub token: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
}

/// POST /api/register: Create an account.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid input or username taken", body = crate::error::ErrorBody),
    ),
    tag = "accounts"
)]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let credentials = extract_json(body)?.into_credentials()?;

    accounts::register(&state.db, &credentials)
        .await
        .map_err(|e| match e {
            AccountError::Storage(source) => AppError::Persistence {
                action: "Failed to register user",
                source,
            },
            other => other.into(),
        })?;

    Ok(Json(MessageResponse::new("Registered")))
}

/// POST /api/login: Exchange credentials for a session token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Session issued", body = LoginResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorBody),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody),
    ),
    tag = "accounts"
)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let credentials = extract_json(body)?.into_credentials()?;

    let user = accounts::verify(&state.db, &credentials).await.map_err(|e| {
        if matches!(e, AccountError::InvalidCredentials) {
            tracing::warn!(username = %credentials.username(), "login failed");
        }
        AppError::from(e)
    })?;

    let token = state.sessions.issue(user)?;
    tracing::info!(user_id = %user, "session issued");

    Ok(Json(LoginResponse { token }))
}
