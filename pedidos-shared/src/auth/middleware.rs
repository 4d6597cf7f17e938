/// Bearer token middleware for Axum
///
/// Extracts the `Authorization: Bearer <token>` header, validates the JWT,
/// and injects an [`AuthUser`] into request extensions. Handlers that need
/// the caller's identity extract it with `Extension<AuthUser>`.
///
/// # Errors
///
/// Requests without a valid token never reach a handler; the middleware
/// answers 401 with a generic message, matching the auth gate contract.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::jwt::validate_token;

/// Authenticated caller, added to request extensions after validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User id from the token subject
    pub user_id: i64,
}

/// Error returned by the auth gate
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header, or not a Bearer scheme
    #[error("Missing credentials")]
    MissingCredentials,

    /// Token failed validation
    #[error("Invalid token")]
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": "unauthorized",
            "message": self.to_string(),
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Validates the bearer token on a request and forwards it with [`AuthUser`]
/// attached
///
/// Apply per-route-group with `axum::middleware::from_fn_with_state` and a
/// thin wrapper that supplies the JWT secret.
pub async fn require_bearer(
    secret: &str,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredentials)?;

    let claims = validate_token(token, secret).map_err(|_| AuthError::InvalidToken)?;

    req.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::MissingCredentials.to_string(), "Missing credentials");
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid token");
    }
}
