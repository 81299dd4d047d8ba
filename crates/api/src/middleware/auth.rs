//! Authentication extractors for admin-only routes.
//!
//! Write operations require a bearer token matching the configured admin
//! token. Read operations are public and take no extractor.

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;
use serde_json::json;

use crate::state::AppState;

/// Extractor that requires a valid admin bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     _admin: RequireAdmin,
///     State(state): State<AppState>,
/// ) -> impl IntoResponse {
///     // only reached with a valid token
/// }
/// ```
pub struct RequireAdmin;

/// Error returned when admin authentication fails.
#[derive(Debug, PartialEq, Eq)]
pub enum AdminAuthRejection {
    /// No `Authorization` header, or not a bearer scheme.
    MissingToken,
    /// Bearer token present but wrong.
    InvalidToken,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "Missing authorization token",
            Self::InvalidToken => "Invalid authorization token",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = bearer_token(parts).ok_or(AdminAuthRejection::MissingToken)?;

        if !constant_time_eq(token, state.config().admin_token.expose_secret()) {
            return Err(AdminAuthRejection::InvalidToken);
        }

        Ok(Self)
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Compare tokens without short-circuiting on the first mismatched byte.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq_matches() {
        assert!(constant_time_eq("abc123", "abc123"));
    }

    #[test]
    fn test_constant_time_eq_rejects_mismatch() {
        assert!(!constant_time_eq("abc123", "abc124"));
        assert!(!constant_time_eq("abc123", "abc12"));
        assert!(!constant_time_eq("", "abc12"));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let request = axum::http::Request::builder()
            .header(header::AUTHORIZATION, "Bearer secret-token")
            .body(())
            .expect("build request");
        let (parts, ()) = request.into_parts();
        assert_eq!(bearer_token(&parts), Some("secret-token"));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let request = axum::http::Request::builder()
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(())
            .expect("build request");
        let (parts, ()) = request.into_parts();
        assert_eq!(bearer_token(&parts), None);
    }
}
