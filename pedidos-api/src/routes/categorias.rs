/// Categoria endpoints
///
/// - `GET /categorias` - list all
/// - `POST /categorias` - create (201)

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Json};
use pedidos_shared::models::categoria::{Categoria, CreateCategoria};
use serde::Deserialize;
use validator::Validate;

/// Create categoria request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoriaRequest {
    /// Category name
    #[validate(length(min = 1, max = 255, message = "nome é obrigatório e deve ter no máximo 255 caracteres"))]
    pub nome: String,
}

/// Lists all categorias
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Categoria>>> {
    let categorias = Categoria::list_all(&state.db).await?;
    Ok(Json(categorias))
}

/// Creates a categoria
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoriaRequest>,
) -> ApiResult<(StatusCode, Json<Categoria>)> {
    req.validate().map_err(crate::error::ApiError::from_validation)?;

    let categoria = Categoria::create(&state.db, CreateCategoria { nome: req.nome }).await?;

    Ok((StatusCode::CREATED, Json(categoria)))
}
