/// Pedido endpoints and the settlement guard surface
///
/// - `GET /pedidos` - list all
/// - `POST /pedidos` - create (201)
/// - `GET /pedidos/:id` - fetch one
/// - `DELETE /pedidos/:id` - delete (guarded)
/// - `GET /pedidos/:id/produtos` - list linked produtos
/// - `POST /pedidos/:id/produtos` - link produtos (201, guarded)
/// - `DELETE /pedidos/:id/produtos` - unlink one produto (guarded)
///
/// The guard itself lives in [`pedidos_shared::models::pedido`]; handlers
/// here translate `PagamentoConcluido` into the operation-specific 403
/// message.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use pedidos_shared::models::{
    cliente::Cliente,
    pedido::{CreatePedido, ItemProduto, Pedido, PedidoError},
    produto::Produto,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

/// Create pedido request
#[derive(Debug, Deserialize)]
pub struct CreatePedidoRequest {
    /// Owning cliente; must reference an existing cliente
    pub id_cliente: i64,
}

/// One entry of a link-produtos batch
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ItemProdutoRequest {
    pub id_produto: i64,

    #[validate(range(min = 1, message = "quantidade deve ser no mínimo 1"))]
    pub quantidade: i32,
}

/// Link-produtos request body
#[derive(Debug, Deserialize, Validate)]
pub struct AddProdutosRequest {
    #[validate(length(min = 1, message = "produtos não pode ser vazio"), nested)]
    pub produtos: Vec<ItemProdutoRequest>,
}

/// Unlink-produto request body
#[derive(Debug, Deserialize)]
pub struct RemoveProdutoRequest {
    pub id_produto: i64,
}

/// Lists all pedidos
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Pedido>>> {
    let pedidos = Pedido::list_all(&state.db).await?;
    Ok(Json(pedidos))
}

/// Creates a pedido
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePedidoRequest>,
) -> ApiResult<(StatusCode, Json<Pedido>)> {
    if !Cliente::exists(&state.db, req.id_cliente).await? {
        return Err(ApiError::invalid_field(
            "id_cliente",
            "Cliente informado não existe",
        ));
    }

    let pedido = Pedido::create(
        &state.db,
        CreatePedido {
            id_cliente: req.id_cliente,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(pedido)))
}

/// Fetches a single pedido
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Pedido>> {
    let pedido = Pedido::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pedido não encontrado.".to_string()))?;

    Ok(Json(pedido))
}

/// Deletes an open pedido
///
/// Settled pedidos are permanent records and answer 403.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<String>> {
    Pedido::delete(&state.db, id).await.map_err(|e| match e {
        PedidoError::PagamentoConcluido => ApiError::Forbidden(
            "Não é possível deletar o pedido com pagamento concluído.".to_string(),
        ),
        other => other.into(),
    })?;

    Ok(Json("Registro deletado com sucesso".to_string()))
}

/// Lists the produtos linked to a pedido
pub async fn list_produtos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Produto>>> {
    let produtos = Pedido::list_produtos(&state.db, id).await?;
    Ok(Json(produtos))
}

/// Links a batch of produtos to an open pedido
///
/// Every produto id is checked before the batch runs; on failure the
/// offending batch index is named in the error detail.
pub async fn add_produtos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AddProdutosRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    req.validate().map_err(ApiError::from_validation)?;

    for (i, item) in req.produtos.iter().enumerate() {
        if !Produto::exists(&state.db, item.id_produto).await? {
            return Err(ApiError::invalid_field(
                format!("produtos.{}.id_produto", i),
                "Produto informado não existe",
            ));
        }
    }

    let items: Vec<ItemProduto> = req
        .produtos
        .iter()
        .map(|p| ItemProduto {
            id_produto: p.id_produto,
            quantidade: p.quantidade,
        })
        .collect();

    Pedido::add_produtos(&state.db, id, &items)
        .await
        .map_err(|e| match e {
            PedidoError::PagamentoConcluido => ApiError::Forbidden(
                "Não é possível adicionar produtos a um pedido com pagamento concluído."
                    .to_string(),
            ),
            other => other.into(),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Produtos adicionados ao pedido com sucesso!" })),
    ))
}

/// Unlinks a single produto from an open pedido
pub async fn remove_produto(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RemoveProdutoRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if !Produto::exists(&state.db, req.id_produto).await? {
        return Err(ApiError::invalid_field(
            "id_produto",
            "Produto informado não existe",
        ));
    }

    Pedido::remove_produto(&state.db, id, req.id_produto)
        .await
        .map_err(|e| match e {
            PedidoError::PagamentoConcluido => ApiError::Forbidden(
                "Não é possível remover produtos de um pedido com pagamento concluído."
                    .to_string(),
            ),
            other => other.into(),
        })?;

    Ok(Json(json!({ "message": "Produto deletado do pedido com sucesso!" })))
}
