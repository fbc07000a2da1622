//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure becomes a status code plus a flat `{"error": "<message>"}`
//! body. The message is fixed per error kind; diagnostic detail (sqlx errors,
//! registry responses, JSON rejection text) is logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use garage_enquiry_client::EnquiryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::accounts::AccountError;
use crate::session::SessionError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// One-line, human-readable description of the failure.
    pub error: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing JSON body, bad path id, or failed validation (400).
    /// The payload is diagnostic detail for the log only.
    #[error("Invalid input")]
    InvalidInput(String),

    /// Registration with a username that already exists (400).
    #[error("Username taken")]
    DuplicateUsername,

    /// Unknown username or wrong password (401).
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session token on a protected route (401).
    #[error("Missing token")]
    MissingToken,

    /// Session token failed signature, expiry or claim checks (401).
    #[error("Invalid token")]
    InvalidToken,

    /// The addressed resource does not exist for this caller (404).
    #[error("{0}")]
    NotFound(&'static str),

    /// A storage operation failed (500). `action` is the client-facing message.
    #[error("{action}")]
    Persistence {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The inspection registry could not be reached or answered with an error (502).
    #[error("Failed to fetch MOT data")]
    Lookup(#[from] EnquiryError),

    /// No registry client is configured (503).
    #[error("MOT lookup is not configured")]
    LookupUnavailable,

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("An internal error occurred")]
    Internal(String),
}

impl AppError {
    /// Build a mapper for `map_err` that tags a storage failure with the
    /// message the client should see.
    pub fn persistence(action: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Persistence { action, source }
    }

    /// Return the HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::DuplicateUsername => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::MissingToken | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Lookup(_) => StatusCode::BAD_GATEWAY,
            Self::LookupUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::InvalidInput(detail) => {
                tracing::debug!(detail = %detail, "rejected invalid input");
            }
            Self::Persistence { action, source } => {
                tracing::error!(error = %source, "{action}");
            }
            Self::Lookup(err) => {
                tracing::error!(error = %err, timeout = err.is_timeout(), "MOT lookup failed");
            }
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<garage_core::ValidationError> for AppError {
    fn from(err: garage_core::ValidationError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::MissingToken => Self::MissingToken,
            SessionError::InvalidToken(_) => Self::InvalidToken,
            SessionError::Signing(detail) => Self::Internal(detail),
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateUsername => Self::DuplicateUsername,
            AccountError::InvalidCredentials => Self::InvalidCredentials,
            other => Self::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn invalid_input_hides_detail() {
        let (status, body) =
            response_parts(AppError::InvalidInput("EOF while parsing".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Invalid input");
    }

    #[tokio::test]
    async fn auth_errors_are_401() {
        for (err, message) in [
            (AppError::MissingToken, "Missing token"),
            (AppError::InvalidToken, "Invalid token"),
            (AppError::InvalidCredentials, "Invalid credentials"),
        ] {
            let (status, body) = response_parts(err).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body.error, message);
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_400() {
        let (status, body) = response_parts(AppError::DuplicateUsername).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Username taken");
    }

    #[tokio::test]
    async fn persistence_uses_action_message() {
        let err = AppError::persistence("Failed to add vehicle")(sqlx::Error::RowNotFound);
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to add vehicle");
    }

    #[tokio::test]
    async fn not_found_carries_message() {
        let (status, body) = response_parts(AppError::NotFound("Vehicle not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Vehicle not found");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("signing key exploded".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.contains("exploded"));
        assert_eq!(body.error, "An internal error occurred");
    }

    #[tokio::test]
    async fn lookup_unavailable_is_503() {
        let (status, body) = response_parts(AppError::LookupUnavailable).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, "MOT lookup is not configured");
    }

    #[test]
    fn session_errors_map_to_auth_errors() {
        assert!(matches!(
            AppError::from(SessionError::MissingToken),
            AppError::MissingToken
        ));
        assert!(matches!(
            AppError::from(SessionError::InvalidToken("expired".into())),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn account_errors_map() {
        assert!(matches!(
            AppError::from(AccountError::DuplicateUsername),
            AppError::DuplicateUsername
        ));
        assert!(matches!(
            AppError::from(AccountError::InvalidCredentials),
            AppError::InvalidCredentials
        ));
        assert_eq!(
            AppError::from(AccountError::Storage(sqlx::Error::PoolTimedOut)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_error_becomes_invalid_input() {
        let err = AppError::from(garage_core::ValidationError::EmptyRegistration);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid input");
    }
}
