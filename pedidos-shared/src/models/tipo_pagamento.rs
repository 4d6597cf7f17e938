/// TipoPagamento model
///
/// Payment methods (e.g., cartão de crédito, boleto, pix). Create-and-read
/// only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// TipoPagamento row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TipoPagamento {
    /// Unique tipo de pagamento id
    pub id: i64,

    /// Method name
    pub nome: String,

    /// When the row was created
    pub created_at: DateTime<Utc>,

    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a tipo de pagamento
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTipoPagamento {
    pub nome: String,
}

impl TipoPagamento {
    /// Creates a new tipo de pagamento
    pub async fn create(pool: &PgPool, data: CreateTipoPagamento) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, TipoPagamento>(
            r#"
            INSERT INTO tipo_pagamentos (nome)
            VALUES ($1)
            RETURNING id, nome, created_at, updated_at
            "#,
        )
        .bind(data.nome)
        .fetch_one(pool)
        .await
    }

    /// Lists all tipos de pagamento
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, TipoPagamento>(
            r#"
            SELECT id, nome, created_at, updated_at
            FROM tipo_pagamentos
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Checks whether a tipo de pagamento id exists
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tipo_pagamentos WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
