/// Common test utilities for integration tests
///
/// Shared infrastructure:
/// - Test database setup (migrations run on first use)
/// - Test API user creation and token generation
/// - Request helpers that drive the router directly via tower
/// - Fixture builders for the business entities

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pedidos_api::app::{build_router, AppState};
use pedidos_api::config::Config;
use pedidos_shared::auth::jwt::{create_token, Claims};
use pedidos_shared::auth::password::hash_password;
use pedidos_shared::models::categoria::{Categoria, CreateCategoria};
use pedidos_shared::models::cliente::{Cliente, CreateCliente};
use pedidos_shared::models::pagamento::{CreatePagamento, Pagamento};
use pedidos_shared::models::pedido::{CreatePedido, Pedido};
use pedidos_shared::models::produto::{CreateProduto, Produto};
use pedidos_shared::models::tipo_pagamento::{CreateTipoPagamento, TipoPagamento};
use pedidos_shared::models::user::User;
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path is relative to Cargo.toml, not this file
        sqlx::migrate!("../pedidos-shared/migrations").run(&db).await?;

        // Each context gets its own API user so tests do not collide
        let username = format!("test-{}", Uuid::new_v4());
        let senha_hash = hash_password("senha-de-teste")?;
        let user = User::ensure(&db, &username, &senha_hash).await?;

        let claims = Claims::new(user.id);
        let token = create_token(&claims, &config.jwt.secret)?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Sends an authenticated request and returns status plus parsed body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", self.auth_header());

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => {
                builder = builder.header("content-type", "application/json");
                builder.body(Body::empty()).unwrap()
            }
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Sends a request without any authorization header
    pub async fn request_unauthenticated(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> StatusCode {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        response.status()
    }
}

/// Generates a unique 11-digit cpf
pub fn unique_cpf() -> String {
    format!("{:011}", Uuid::new_v4().as_u128() % 100_000_000_000)
}

/// Generates a unique email
pub fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

/// Creates a cliente directly in the database
pub async fn create_test_cliente(ctx: &TestContext) -> anyhow::Result<Cliente> {
    let cliente = Cliente::create(
        &ctx.db,
        CreateCliente {
            nome: "Cliente de Teste".to_string(),
            idade: 30,
            email: unique_email(),
            cpf: unique_cpf(),
        },
    )
    .await?;
    Ok(cliente)
}

/// Creates a produto directly in the database
pub async fn create_test_produto(ctx: &TestContext, preco: f64) -> anyhow::Result<Produto> {
    let produto = Produto::create(
        &ctx.db,
        CreateProduto {
            nome: format!("Produto {}", Uuid::new_v4()),
            descricao: "Produto de teste".to_string(),
            preco,
            estoque: Some(10),
        },
    )
    .await?;
    Ok(produto)
}

/// Creates a categoria directly in the database
pub async fn create_test_categoria(ctx: &TestContext) -> anyhow::Result<Categoria> {
    let categoria = Categoria::create(
        &ctx.db,
        CreateCategoria {
            nome: format!("Categoria {}", Uuid::new_v4()),
        },
    )
    .await?;
    Ok(categoria)
}

/// Creates a tipo de pagamento directly in the database
pub async fn create_test_tipo_pagamento(ctx: &TestContext) -> anyhow::Result<TipoPagamento> {
    let tipo = TipoPagamento::create(
        &ctx.db,
        CreateTipoPagamento {
            nome: format!("Tipo {}", Uuid::new_v4()),
        },
    )
    .await?;
    Ok(tipo)
}

/// Creates a pedido for a fresh cliente
pub async fn create_test_pedido(ctx: &TestContext) -> anyhow::Result<Pedido> {
    let cliente = create_test_cliente(ctx).await?;
    let pedido = Pedido::create(
        &ctx.db,
        CreatePedido {
            id_cliente: cliente.id,
        },
    )
    .await?;
    Ok(pedido)
}

/// Settles a pedido by creating a pagamento for it
pub async fn settle_pedido(ctx: &TestContext, id_pedido: i64) -> anyhow::Result<Pagamento> {
    let tipo = create_test_tipo_pagamento(ctx).await?;
    let pagamento = Pagamento::create(
        &ctx.db,
        CreatePagamento {
            id_pedido,
            id_tipopagamento: tipo.id,
        },
    )
    .await?;
    Ok(pagamento)
}
