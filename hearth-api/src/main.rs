//! # Hearth API Server
//!
//! Backend for a shared household task list:
//! - Passwordless magic-link authentication with session tokens
//! - Households joined by invite code
//! - Shared tasks with independent claim and complete lifecycles
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p hearth-api
//! ```

use hearth_api::{
    app::{build_router, AppState},
    config::Config,
};
use hearth_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Hearth API v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let db = pool::create_pool(config.database.pool_config()).await?;
    migrations::run_migrations(&db).await?;

    let addr = config.bind_address();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
