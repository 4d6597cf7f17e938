/// Token issuance endpoint
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {"username": "apiuser", "password": "..."}
/// ```
///
/// # Response
///
/// ```json
/// {"token": "eyJ..."}
/// ```
///
/// Bad credentials answer 401 with a generic message; whether the username
/// or the password was wrong is not revealed.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use pedidos_shared::{
    auth::{jwt, password},
    models::user::User,
};
use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token, valid for 24 hours
    pub token: String,
}

/// Issues a bearer token for valid credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Credenciais inválidas".to_string()))?;

    if !password::verify_password(&req.password, &user.senha_hash)? {
        return Err(ApiError::Unauthorized("Credenciais inválidas".to_string()));
    }

    let claims = jwt::Claims::new(user.id);
    let token = jwt::create_token(&claims, state.jwt_secret())
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(Json(LoginResponse { token }))
}
