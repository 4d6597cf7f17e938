/// Produto endpoints
///
/// - `GET /produtos` - filtered listing
/// - `POST /produtos` - create
/// - `GET /produtos/:id` - fetch one
/// - `GET /produtos/:id/categorias` - list linked categorias
/// - `POST /produtos/:id/categorias` - link categorias (201)
///
/// On creation the price format rule (up to 6 integer digits, optional 2
/// decimals) is enforced on the raw text before any numeric conversion, so
/// `19.999` is rejected instead of silently rounded. Query-string filters
/// only have to be non-negative numbers.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use pedidos_shared::models::{
    categoria::Categoria,
    produto::{CreateProduto, Produto, ProdutoFilter},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::{Validate, ValidationError};

/// Price as submitted, kept as text until the format check passes
///
/// Accepts a JSON string or number; either way the raw representation is
/// what gets validated, so `19.999` fails even though it parses as f64.
#[derive(Debug, Clone, Serialize)]
pub struct Preco(String);

impl<'de> Deserialize<'de> for Preco {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Preco(s),
            // serde_json keeps integral floats integral in Display
            Raw::Num(n) => Preco(json!(n).to_string()),
        })
    }
}

impl Preco {
    /// Numeric value; only meaningful after validation has passed
    pub fn valor(&self) -> f64 {
        self.0.parse().unwrap_or(0.0)
    }
}

/// Checks the price text: 1 to 6 integer digits, optionally a dot and 1 or
/// 2 decimal digits. Nothing else.
fn preco_formato_valido(s: &str) -> bool {
    let (inteiro, decimal) = match s.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (s, None),
    };

    if inteiro.is_empty() || inteiro.len() > 6 || !inteiro.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match decimal {
        None => true,
        Some(d) => !d.is_empty() && d.len() <= 2 && d.bytes().all(|b| b.is_ascii_digit()),
    }
}

fn validar_preco(preco: &Preco) -> Result<(), ValidationError> {
    if preco_formato_valido(&preco.0) {
        Ok(())
    } else {
        Err(ValidationError::new("preco")
            .with_message("preco deve ser um valor com até 6 dígitos e 2 casas decimais".into()))
    }
}

/// Create produto request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProdutoRequest {
    #[validate(length(min = 1, max = 255, message = "nome é obrigatório e deve ter no máximo 255 caracteres"))]
    pub nome: String,

    #[validate(length(min = 1, max = 255, message = "descricao é obrigatória e deve ter no máximo 255 caracteres"))]
    pub descricao: String,

    #[validate(custom(function = validar_preco))]
    pub preco: Preco,

    pub estoque: Option<i32>,
}

/// Listing filters, all optional, arriving as raw query-string text
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<String>,
    #[serde(rename = "menorPreco")]
    pub menor_preco: Option<String>,
    #[serde(rename = "maiorPreco")]
    pub maior_preco: Option<String>,
    pub estoque: Option<String>,
}

/// Parses one optional price-valued query parameter
///
/// Filters only need to be non-negative numbers; the digit-count rule
/// applies to stored prices, not to search bounds. Empty strings count as
/// absent, matching how HTML forms submit untouched fields.
fn parse_preco_param(name: &str, value: &Option<String>) -> Result<Option<f64>, ApiError> {
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => match s.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
            _ => Err(ApiError::invalid_field(name, "deve ser um número não negativo")),
        },
    }
}

fn parse_estoque_param(value: &Option<String>) -> Result<Option<i32>, ApiError> {
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => match s.parse::<i32>() {
            Ok(n) if n >= 0 => Ok(Some(n)),
            _ => Err(ApiError::invalid_field(
                "estoque",
                "deve ser um inteiro não negativo",
            )),
        },
    }
}

/// Lists produtos, applying any filters present in the query string
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Produto>>> {
    let filter = ProdutoFilter {
        nome: query.nome.filter(|s| !s.is_empty()),
        descricao: query.descricao.filter(|s| !s.is_empty()),
        preco: parse_preco_param("preco", &query.preco)?,
        preco_min: parse_preco_param("menorPreco", &query.menor_preco)?,
        preco_max: parse_preco_param("maiorPreco", &query.maior_preco)?,
        estoque: parse_estoque_param(&query.estoque)?,
    };

    let produtos = Produto::search(&state.db, filter).await?;
    Ok(Json(produtos))
}

/// Creates a produto
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateProdutoRequest>,
) -> ApiResult<Json<Produto>> {
    req.validate().map_err(ApiError::from_validation)?;

    if let Some(estoque) = req.estoque {
        if estoque < 0 {
            return Err(ApiError::invalid_field(
                "estoque",
                "deve ser um inteiro não negativo",
            ));
        }
    }

    let produto = Produto::create(
        &state.db,
        CreateProduto {
            nome: req.nome,
            descricao: req.descricao,
            preco: req.preco.valor(),
            estoque: req.estoque,
        },
    )
    .await?;

    Ok(Json(produto))
}

/// Fetches a single produto
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Produto>> {
    let produto = Produto::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Produto não encontrado.".to_string()))?;

    Ok(Json(produto))
}

/// Lists the categorias linked to a produto
pub async fn list_categorias(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Categoria>>> {
    if !Produto::exists(&state.db, id).await? {
        return Err(ApiError::NotFound("Produto não encontrado.".to_string()));
    }

    let categorias = Produto::list_categorias(&state.db, id).await?;
    Ok(Json(categorias))
}

/// One entry of a link-categorias batch
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemCategoria {
    pub id_categoria: i64,
}

/// Link-categorias request body
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoriasRequest {
    #[validate(length(min = 1, message = "categorias não pode ser vazio"))]
    pub categorias: Vec<ItemCategoria>,
}

/// Links a batch of categorias to a produto
///
/// Every categoria id is checked before any row is written; on failure the
/// offending batch index is named in the error detail.
pub async fn add_categorias(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AddCategoriasRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    req.validate().map_err(ApiError::from_validation)?;

    if !Produto::exists(&state.db, id).await? {
        return Err(ApiError::NotFound("Produto não encontrado.".to_string()));
    }

    for (i, item) in req.categorias.iter().enumerate() {
        if !Categoria::exists(&state.db, item.id_categoria).await? {
            return Err(ApiError::invalid_field(
                format!("categorias.{}.id_categoria", i),
                "Categoria informada não existe",
            ));
        }
    }

    let ids: Vec<i64> = req.categorias.iter().map(|c| c.id_categoria).collect();
    Produto::add_categorias(&state.db, id, &ids).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Categorias adicionadas ao produto com sucesso!" })),
    ))
}
