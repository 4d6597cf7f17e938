/// Pedido model, product links, and the settlement guard
///
/// A pedido is Open until a pagamento references it, then Settled. Every
/// mutation here branches on that state: adding products, removing a
/// product, and deleting the pedido are all refused once settled.
///
/// Each mutating operation runs guard-check and mutation inside a single
/// transaction with the pedido row locked (`SELECT ... FOR UPDATE`), so a
/// concurrent pagamento cannot slip in between "no payment yet" and the
/// join-row write.
///
/// # Example
///
/// ```no_run
/// use pedidos_shared::models::pedido::{ItemProduto, Pedido, PedidoError};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), PedidoError> {
/// Pedido::add_produtos(&pool, 1, &[ItemProduto { id_produto: 1, quantidade: 2 }]).await?;
///
/// match Pedido::delete(&pool, 1).await {
///     Err(PedidoError::PagamentoConcluido) => { /* settled, refuse */ }
///     other => other?,
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use super::produto::Produto;

/// Errors from pedido operations
#[derive(Debug, thiserror::Error)]
pub enum PedidoError {
    /// Pedido id does not resolve
    #[error("Pedido não encontrado")]
    NaoEncontrado,

    /// Pedido is settled; its product set and existence are frozen
    #[error("Pedido com pagamento concluído")]
    PagamentoConcluido,

    /// Produto is not linked to the pedido
    #[error("Produto não vinculado ao pedido")]
    ProdutoNaoVinculado,

    /// Underlying database error
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Pedido row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pedido {
    /// Unique pedido id
    pub id: i64,

    /// Cliente the pedido belongs to
    pub id_cliente: i64,

    /// When the pedido was created
    pub created_at: DateTime<Utc>,

    /// When the pedido was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a pedido
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePedido {
    pub id_cliente: i64,
}

/// One entry of an add-products batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemProduto {
    /// Produto to link
    pub id_produto: i64,

    /// Quantity for the link row, minimum 1 (validated upstream)
    pub quantidade: i32,
}

/// Locks the pedido row and verifies it is still open
///
/// Returns `NaoEncontrado` if the id does not resolve and
/// `PagamentoConcluido` if a pagamento already references it. The row lock
/// is held until the caller's transaction ends.
async fn lock_pedido_aberto(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
) -> Result<(), PedidoError> {
    let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM pedidos WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    if locked.is_none() {
        return Err(PedidoError::NaoEncontrado);
    }

    let pago: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pagamentos WHERE id_pedido = $1)")
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;

    if pago {
        return Err(PedidoError::PagamentoConcluido);
    }

    Ok(())
}

impl Pedido {
    /// Creates a new pedido for a cliente
    pub async fn create(pool: &PgPool, data: CreatePedido) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Pedido>(
            r#"
            INSERT INTO pedidos (id_cliente)
            VALUES ($1)
            RETURNING id, id_cliente, created_at, updated_at
            "#,
        )
        .bind(data.id_cliente)
        .fetch_one(pool)
        .await
    }

    /// Lists all pedidos
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Pedido>(
            r#"
            SELECT id, id_cliente, created_at, updated_at
            FROM pedidos
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Finds a pedido by id
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Pedido>(
            r#"
            SELECT id, id_cliente, created_at, updated_at
            FROM pedidos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Checks whether a pedido id exists
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pedidos WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Checks whether a pedido is settled
    pub async fn has_pagamento(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pagamentos WHERE id_pedido = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Links a batch of produtos to an open pedido
    ///
    /// Produto ids and quantities are validated by the caller before
    /// invocation. The batch is atomic: guard failure or any insert error
    /// rolls the whole call back. A repeated produto id upserts, so the
    /// last quantity supplied for it wins.
    pub async fn add_produtos(
        pool: &PgPool,
        id: i64,
        items: &[ItemProduto],
    ) -> Result<(), PedidoError> {
        let mut tx = pool.begin().await?;

        lock_pedido_aberto(&mut tx, id).await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO produto_pedido (id_produto, id_pedido, quantidade)
                VALUES ($1, $2, $3)
                ON CONFLICT (id_pedido, id_produto)
                DO UPDATE SET quantidade = EXCLUDED.quantidade, updated_at = NOW()
                "#,
            )
            .bind(item.id_produto)
            .bind(id)
            .bind(item.quantidade)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Unlinks a single produto from an open pedido
    ///
    /// Returns `ProdutoNaoVinculado` if no link row exists; nothing is
    /// changed in that case.
    pub async fn remove_produto(
        pool: &PgPool,
        id: i64,
        id_produto: i64,
    ) -> Result<(), PedidoError> {
        let mut tx = pool.begin().await?;

        lock_pedido_aberto(&mut tx, id).await?;

        let result =
            sqlx::query("DELETE FROM produto_pedido WHERE id_pedido = $1 AND id_produto = $2")
                .bind(id)
                .bind(id_produto)
                .execute(&mut *tx)
                .await?;

        if result.rows_affected() == 0 {
            return Err(PedidoError::ProdutoNaoVinculado);
        }

        tx.commit().await?;
        Ok(())
    }

    /// Lists the produtos linked to a pedido
    ///
    /// Returns produto columns only: quantidade and the rest of the join row
    /// never reach the caller.
    pub async fn list_produtos(pool: &PgPool, id: i64) -> Result<Vec<Produto>, PedidoError> {
        if !Self::exists(pool, id).await? {
            return Err(PedidoError::NaoEncontrado);
        }

        let produtos = sqlx::query_as::<_, Produto>(
            r#"
            SELECT p.id, p.nome, p.descricao, p.preco, p.estoque, p.created_at, p.updated_at
            FROM produtos p
            INNER JOIN produto_pedido pp ON pp.id_produto = p.id
            WHERE pp.id_pedido = $1
            ORDER BY p.id
            "#,
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(produtos)
    }

    /// Deletes an open pedido together with its product links
    ///
    /// The join rows carry RESTRICT foreign keys, so they are removed in the
    /// same transaction as the pedido row itself.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), PedidoError> {
        let mut tx = pool.begin().await?;

        lock_pedido_aberto(&mut tx, id).await?;

        sqlx::query("DELETE FROM produto_pedido WHERE id_pedido = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM pedidos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(PedidoError::NaoEncontrado.to_string(), "Pedido não encontrado");
        assert_eq!(
            PedidoError::ProdutoNaoVinculado.to_string(),
            "Produto não vinculado ao pedido"
        );
    }

    #[test]
    fn test_item_produto_deserialize() {
        let item: ItemProduto =
            serde_json::from_str(r#"{"id_produto": 3, "quantidade": 2}"#).unwrap();
        assert_eq!(item.id_produto, 3);
        assert_eq!(item.quantidade, 2);
    }
}
