//! # TeamBoard API Server
//!
//! This is the main API server for TeamBoard, providing user signup and
//! login, per-user items, and role-based project collaboration.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - Authentication endpoints (signup, login) issuing bearer tokens
//! - Per-user item CRUD
//! - Project CRUD with membership-based authorization
//! - Membership management (add, change role, remove)
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p teamboard-api
//! ```

use teamboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teamboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TeamBoard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = teamboard_shared::db::create_pool(teamboard_shared::db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    teamboard_shared::db::run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
