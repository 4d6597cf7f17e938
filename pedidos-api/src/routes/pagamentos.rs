/// Pagamento endpoints
///
/// - `GET /pagamentos` - list all
/// - `POST /pagamentos` - create
///
/// Creating a pagamento settles its pedido: from then on the pedido's
/// product set is frozen and the pedido cannot be deleted. Creation itself
/// carries no guard; settlement only asks whether at least one pagamento
/// exists, so a second pagamento for the same pedido is accepted.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use pedidos_shared::models::{
    pagamento::{CreatePagamento, Pagamento},
    pedido::Pedido,
    tipo_pagamento::TipoPagamento,
};
use serde::Deserialize;

/// Create pagamento request
#[derive(Debug, Deserialize)]
pub struct CreatePagamentoRequest {
    /// Pedido being paid; must reference an existing pedido
    pub id_pedido: i64,

    /// Payment method; must reference an existing tipo de pagamento
    pub id_tipopagamento: i64,
}

/// Lists all pagamentos
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Pagamento>>> {
    let pagamentos = Pagamento::list_all(&state.db).await?;
    Ok(Json(pagamentos))
}

/// Creates a pagamento, settling its pedido
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePagamentoRequest>,
) -> ApiResult<Json<Pagamento>> {
    if !Pedido::exists(&state.db, req.id_pedido).await? {
        return Err(ApiError::invalid_field(
            "id_pedido",
            "Pedido informado não existe",
        ));
    }

    if !TipoPagamento::exists(&state.db, req.id_tipopagamento).await? {
        return Err(ApiError::invalid_field(
            "id_tipopagamento",
            "Tipo de pagamento informado não existe",
        ));
    }

    let pagamento = Pagamento::create(
        &state.db,
        CreatePagamento {
            id_pedido: req.id_pedido,
            id_tipopagamento: req.id_tipopagamento,
        },
    )
    .await?;

    Ok(Json(pagamento))
}
