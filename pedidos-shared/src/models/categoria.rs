/// Categoria model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Categoria row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Categoria {
    /// Unique categoria id
    pub id: i64,

    /// Category name
    pub nome: String,

    /// When the categoria was created
    pub created_at: DateTime<Utc>,

    /// When the categoria was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a categoria
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoria {
    pub nome: String,
}

impl Categoria {
    /// Creates a new categoria
    pub async fn create(pool: &PgPool, data: CreateCategoria) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Categoria>(
            r#"
            INSERT INTO categorias (nome)
            VALUES ($1)
            RETURNING id, nome, created_at, updated_at
            "#,
        )
        .bind(data.nome)
        .fetch_one(pool)
        .await
    }

    /// Lists all categorias
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Categoria>(
            r#"
            SELECT id, nome, created_at, updated_at
            FROM categorias
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Checks whether a categoria id exists
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categorias WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
