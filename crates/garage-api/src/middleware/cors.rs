//! # CORS
//!
//! Browser clients are served from anywhere. `OPTIONS` requests never reach
//! routing or the session check and always answer 204 with no body:
//! preflights are answered by [`layer`], anything else by
//! [`short_circuit_options`].

use axum::extract::Request;
use axum::http::{header, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{Any, CorsLayer};

pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_private_network(false)
}

/// Sits inside [`layer`]: answers non-preflight `OPTIONS` before routing.
pub async fn short_circuit_options(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(request).await
}

/// Sits outside [`layer`]: the preflight answer from `CorsLayer` is 200 with
/// an empty body, reported here as 204.
pub async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
