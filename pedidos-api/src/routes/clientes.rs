/// Cliente endpoints
///
/// - `GET /clientes` - list all
/// - `POST /clientes` - create
///
/// Email and cpf uniqueness are pre-checked so the caller gets field-level
/// detail; the unique constraints in the schema remain as a backstop for
/// races (mapped to 409 in `error.rs`).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use pedidos_shared::models::cliente::{Cliente, CreateCliente};
use serde::Deserialize;
use validator::Validate;

/// Create cliente request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClienteRequest {
    /// Full name
    #[validate(length(min = 1, max = 255, message = "nome é obrigatório e deve ter no máximo 255 caracteres"))]
    pub nome: String,

    /// Age in years
    pub idade: i32,

    /// Email address, unique
    #[validate(
        email(message = "Formato de email inválido"),
        length(max = 255, message = "email deve ter no máximo 255 caracteres")
    )]
    pub email: String,

    /// National id, exactly 11 characters, unique
    #[validate(length(equal = 11, message = "cpf deve ter exatamente 11 caracteres"))]
    pub cpf: String,
}

/// Lists all clientes
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Cliente>>> {
    let clientes = Cliente::list_all(&state.db).await?;
    Ok(Json(clientes))
}

/// Creates a cliente
///
/// Identity fields are immutable once created; there is no update endpoint.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateClienteRequest>,
) -> ApiResult<Json<Cliente>> {
    req.validate().map_err(ApiError::from_validation)?;

    if Cliente::email_em_uso(&state.db, &req.email).await? {
        return Err(ApiError::invalid_field("email", "Email já cadastrado"));
    }

    if Cliente::cpf_em_uso(&state.db, &req.cpf).await? {
        return Err(ApiError::invalid_field("cpf", "CPF já cadastrado"));
    }

    let cliente = Cliente::create(
        &state.db,
        CreateCliente {
            nome: req.nome,
            idade: req.idade,
            email: req.email,
            cpf: req.cpf,
        },
    )
    .await?;

    Ok(Json(cliente))
}
