/// Tipo de pagamento endpoints
///
/// - `GET /tipopagamento` - list all
/// - `POST /tipopagamento` - create (201)

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Json};
use pedidos_shared::models::tipo_pagamento::{CreateTipoPagamento, TipoPagamento};
use serde::Deserialize;
use validator::Validate;

/// Create tipo de pagamento request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTipoPagamentoRequest {
    /// Method name (e.g., "cartão de crédito", "boleto", "pix")
    #[validate(length(min = 1, max = 255, message = "nome é obrigatório e deve ter no máximo 255 caracteres"))]
    pub nome: String,
}

/// Lists all tipos de pagamento
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<TipoPagamento>>> {
    let tipos = TipoPagamento::list_all(&state.db).await?;
    Ok(Json(tipos))
}

/// Creates a tipo de pagamento
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateTipoPagamentoRequest>,
) -> ApiResult<(StatusCode, Json<TipoPagamento>)> {
    req.validate().map_err(crate::error::ApiError::from_validation)?;

    let tipo = TipoPagamento::create(&state.db, CreateTipoPagamento { nome: req.nome }).await?;

    Ok((StatusCode::CREATED, Json(tipo)))
}
