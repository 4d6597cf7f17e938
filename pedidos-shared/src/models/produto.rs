/// Produto model, category links, and filtered search
///
/// Products relate many-to-many with categorias (no attributes on the link)
/// and with pedidos (the link carries a quantity, managed in
/// [`crate::models::pedido`]). Category membership has no settlement concept:
/// links can be added at any time.
///
/// # Example
///
/// ```no_run
/// use pedidos_shared::models::produto::{Produto, ProdutoFilter};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let baratos = Produto::search(&pool, ProdutoFilter {
///     preco_max: Some(50.0),
///     ..Default::default()
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::categoria::Categoria;

/// Produto row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Produto {
    /// Unique produto id
    pub id: i64,

    /// Product name
    pub nome: String,

    /// Product description
    pub descricao: String,

    /// Unit price, non-negative, at most 6 integer and 2 decimal digits
    pub preco: f64,

    /// Units in stock, if tracked
    pub estoque: Option<i32>,

    /// When the produto was created
    pub created_at: DateTime<Utc>,

    /// When the produto was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a produto
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduto {
    pub nome: String,
    pub descricao: String,
    pub preco: f64,
    pub estoque: Option<i32>,
}

/// Optional filters for the produto listing, ANDed together
///
/// Substring filters match anywhere in the column; price bounds are
/// inclusive. Absent fields apply no filter.
#[derive(Debug, Clone, Default)]
pub struct ProdutoFilter {
    /// Substring match on nome
    pub nome: Option<String>,

    /// Substring match on descricao
    pub descricao: Option<String>,

    /// Exact price
    pub preco: Option<f64>,

    /// Lower price bound (inclusive)
    pub preco_min: Option<f64>,

    /// Upper price bound (inclusive)
    pub preco_max: Option<f64>,

    /// Exact stock count
    pub estoque: Option<i32>,
}

const PRODUTO_COLUMNS: &str = "id, nome, descricao, preco, estoque, created_at, updated_at";

/// Builds the filtered SELECT for [`Produto::search`]
///
/// Bind placeholders are numbered in filter declaration order; `search` must
/// bind values in the same order.
fn build_search_sql(filter: &ProdutoFilter) -> String {
    let mut clauses: Vec<String> = Vec::new();
    let mut bind = 0;

    if filter.nome.is_some() {
        bind += 1;
        clauses.push(format!("nome LIKE ${}", bind));
    }
    if filter.descricao.is_some() {
        bind += 1;
        clauses.push(format!("descricao LIKE ${}", bind));
    }
    if filter.preco.is_some() {
        bind += 1;
        clauses.push(format!("preco = ${}", bind));
    }
    if filter.preco_min.is_some() {
        bind += 1;
        clauses.push(format!("preco >= ${}", bind));
    }
    if filter.preco_max.is_some() {
        bind += 1;
        clauses.push(format!("preco <= ${}", bind));
    }
    if filter.estoque.is_some() {
        bind += 1;
        clauses.push(format!("estoque = ${}", bind));
    }

    let mut sql = format!("SELECT {} FROM produtos", PRODUTO_COLUMNS);
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id");
    sql
}

impl Produto {
    /// Creates a new produto
    pub async fn create(pool: &PgPool, data: CreateProduto) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Produto>(&format!(
            r#"
            INSERT INTO produtos (nome, descricao, preco, estoque)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PRODUTO_COLUMNS
        ))
        .bind(data.nome)
        .bind(data.descricao)
        .bind(data.preco)
        .bind(data.estoque)
        .fetch_one(pool)
        .await
    }

    /// Finds a produto by id
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Produto>(&format!(
            "SELECT {} FROM produtos WHERE id = $1",
            PRODUTO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Checks whether a produto id exists
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM produtos WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Lists produtos matching the given filters
    ///
    /// Filters are ANDed; an empty filter returns every produto. No
    /// pagination or limit is applied.
    pub async fn search(pool: &PgPool, filter: ProdutoFilter) -> Result<Vec<Self>, sqlx::Error> {
        let sql = build_search_sql(&filter);
        let mut query = sqlx::query_as::<_, Produto>(&sql);

        // Bind order must mirror build_search_sql
        if let Some(nome) = &filter.nome {
            query = query.bind(format!("%{}%", nome));
        }
        if let Some(descricao) = &filter.descricao {
            query = query.bind(format!("%{}%", descricao));
        }
        if let Some(preco) = filter.preco {
            query = query.bind(preco);
        }
        if let Some(preco_min) = filter.preco_min {
            query = query.bind(preco_min);
        }
        if let Some(preco_max) = filter.preco_max {
            query = query.bind(preco_max);
        }
        if let Some(estoque) = filter.estoque {
            query = query.bind(estoque);
        }

        query.fetch_all(pool).await
    }

    /// Links categorias to a produto
    ///
    /// The whole batch runs in one transaction: either every link lands or
    /// none does. Attaching an already-linked categoria is a no-op rather
    /// than a duplicate row. Categoria ids are validated by the caller
    /// before invocation.
    pub async fn add_categorias(
        pool: &PgPool,
        id: i64,
        categoria_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for id_categoria in categoria_ids {
            sqlx::query(
                r#"
                INSERT INTO produto_categoria (id_produto, id_categoria)
                VALUES ($1, $2)
                ON CONFLICT (id_produto, id_categoria) DO NOTHING
                "#,
            )
            .bind(id)
            .bind(id_categoria)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// Lists the categorias linked to a produto
    ///
    /// Returns categoria columns only; join-table fields never reach the
    /// caller.
    pub async fn list_categorias(pool: &PgPool, id: i64) -> Result<Vec<Categoria>, sqlx::Error> {
        sqlx::query_as::<_, Categoria>(
            r#"
            SELECT c.id, c.nome, c.created_at, c.updated_at
            FROM categorias c
            INNER JOIN produto_categoria pc ON pc.id_categoria = c.id
            WHERE pc.id_produto = $1
            ORDER BY c.id
            "#,
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }
}
