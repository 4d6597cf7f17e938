/// API user model
///
/// Users exist only so the token endpoint has credentials to check; none of
/// the business entities reference them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// API user row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user id
    pub id: i64,

    /// Login name
    pub username: String,

    /// Argon2id hash of the password (never serialized to callers)
    #[serde(skip_serializing)]
    pub senha_hash: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Finds a user by username
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, senha_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Creates a user if one with this username does not exist yet
    ///
    /// Used by the startup bootstrap so a fresh deployment has a credential
    /// to log in with. Returns the existing or newly created row.
    pub async fn ensure(
        pool: &PgPool,
        username: &str,
        senha_hash: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (username, senha_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(senha_hash)
        .execute(pool)
        .await?;

        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, senha_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_one(pool)
        .await
    }
}
