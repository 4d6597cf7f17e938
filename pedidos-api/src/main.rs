//! # Pedidos API Server
//!
//! Order-management REST API over PostgreSQL. See the library crate for the
//! router layout.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/pedidos \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p pedidos-api
//! ```

use pedidos_api::{
    app::{build_router, AppState},
    config::Config,
};
use pedidos_shared::{
    auth::password::hash_password,
    db::{migrations::run_migrations, pool},
    models::user::User,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pedidos_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Pedidos API v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&db).await?;

    // Optional first credential, so a fresh deployment can obtain a token
    if let Some(bootstrap) = &config.bootstrap {
        let hash = hash_password(&bootstrap.password)
            .map_err(|e| anyhow::anyhow!("Failed to hash bootstrap password: {}", e))?;
        let user = User::ensure(&db, &bootstrap.username, &hash).await?;
        tracing::info!(username = %user.username, "Bootstrap user ready");
    }

    let bind_address = config.bind_address();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
