/// Cliente model
///
/// Clientes are create-and-read only: identity fields are immutable once
/// created and there are no update or delete operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Cliente row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cliente {
    /// Unique cliente id
    pub id: i64,

    /// Full name
    pub nome: String,

    /// Age in years
    pub idade: i32,

    /// Email address (unique)
    pub email: String,

    /// National id, exactly 11 characters (unique)
    pub cpf: String,

    /// When the cliente was created
    pub created_at: DateTime<Utc>,

    /// When the cliente was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a cliente
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCliente {
    pub nome: String,
    pub idade: i32,
    pub email: String,
    pub cpf: String,
}

impl Cliente {
    /// Creates a new cliente
    pub async fn create(pool: &PgPool, data: CreateCliente) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (nome, idade, email, cpf)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nome, idade, email, cpf, created_at, updated_at
            "#,
        )
        .bind(data.nome)
        .bind(data.idade)
        .bind(data.email)
        .bind(data.cpf)
        .fetch_one(pool)
        .await
    }

    /// Lists all clientes
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Cliente>(
            r#"
            SELECT id, nome, idade, email, cpf, created_at, updated_at
            FROM clientes
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Checks whether a cliente id exists
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM clientes WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Checks whether an email is already registered
    pub async fn email_em_uso(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM clientes WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Checks whether a cpf is already registered
    pub async fn cpf_em_uso(pool: &PgPool, cpf: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM clientes WHERE cpf = $1)")
            .bind(cpf)
            .fetch_one(pool)
            .await
    }
}
