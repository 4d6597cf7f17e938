/// Pagamento model
///
/// A pagamento row marks its pedido as settled; once it exists the pedido's
/// product set can no longer be changed and the pedido cannot be deleted.
/// Creation itself is unguarded and one-way; there is no reversal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Pagamento row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pagamento {
    /// Unique pagamento id
    pub id: i64,

    /// Pedido being paid
    pub id_pedido: i64,

    /// Payment method used
    pub id_tipopagamento: i64,

    /// When the pagamento was created
    pub created_at: DateTime<Utc>,

    /// When the pagamento was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a pagamento
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePagamento {
    pub id_pedido: i64,
    pub id_tipopagamento: i64,
}

impl Pagamento {
    /// Creates a new pagamento, settling its pedido
    pub async fn create(pool: &PgPool, data: CreatePagamento) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Pagamento>(
            r#"
            INSERT INTO pagamentos (id_pedido, id_tipopagamento)
            VALUES ($1, $2)
            RETURNING id, id_pedido, id_tipopagamento, created_at, updated_at
            "#,
        )
        .bind(data.id_pedido)
        .bind(data.id_tipopagamento)
        .fetch_one(pool)
        .await
    }

    /// Lists all pagamentos
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Pagamento>(
            r#"
            SELECT id, id_pedido, id_tipopagamento, created_at, updated_at
            FROM pagamentos
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }
}
