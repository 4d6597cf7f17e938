/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Router layout
///
/// ```text
/// /
/// ├── /health                        # liveness + db ping (public)
/// ├── /login                         # token issuance (public)
/// └── (bearer token required)
///     ├── /categorias                GET, POST
///     ├── /tipopagamento             GET, POST
///     ├── /pagamentos                GET, POST
///     ├── /clientes                  GET, POST
///     ├── /produtos                  GET (filtered), POST
///     ├── /produtos/:id              GET
///     ├── /produtos/:id/categorias   GET, POST
///     ├── /pedidos                   GET, POST
///     ├── /pedidos/:id               GET, DELETE
///     └── /pedidos/:id/produtos      GET, POST, DELETE
/// ```
///
/// # Middleware Stack
///
/// Applied in order: request tracing (tower-http TraceLayer), CORS, bearer
/// authentication on the protected group.

use crate::config::Config;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{delete, get, post},
    Router,
};
use pedidos_shared::auth::middleware::{require_bearer, AuthError};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes, no auth
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/login", post(routes::auth::login));

    // Everything else sits behind the bearer token gate
    let protected_routes = Router::new()
        .route("/categorias", get(routes::categorias::list))
        .route("/categorias", post(routes::categorias::create))
        .route("/tipopagamento", get(routes::tipo_pagamento::list))
        .route("/tipopagamento", post(routes::tipo_pagamento::create))
        .route("/pagamentos", get(routes::pagamentos::list))
        .route("/pagamentos", post(routes::pagamentos::create))
        .route("/clientes", get(routes::clientes::list))
        .route("/clientes", post(routes::clientes::create))
        .route("/produtos", get(routes::produtos::list))
        .route("/produtos", post(routes::produtos::create))
        .route("/produtos/:id", get(routes::produtos::get_by_id))
        .route("/produtos/:id/categorias", get(routes::produtos::list_categorias))
        .route("/produtos/:id/categorias", post(routes::produtos::add_categorias))
        .route("/pedidos", get(routes::pedidos::list))
        .route("/pedidos", post(routes::pedidos::create))
        .route("/pedidos/:id", get(routes::pedidos::get_by_id))
        .route("/pedidos/:id", delete(routes::pedidos::delete))
        .route("/pedidos/:id/produtos", get(routes::pedidos::list_produtos))
        .route("/pedidos/:id/produtos", post(routes::pedidos::add_produtos))
        .route("/pedidos/:id/produtos", delete(routes::pedidos::remove_produto))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bearer authentication layer for the protected route group
async fn auth_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    require_bearer(state.jwt_secret(), req, next).await
}
