/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use hearth_api::{app::AppState, config::Config};
/// use hearth_shared::db::pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let db = pool::create_pool(config.database.pool_config()).await?;
/// let state = AppState::new(db, config);
/// let app = hearth_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::auth::require_user};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// └── /api/
///     ├── /auth/
///     │   ├── POST /magic-link         # Request a magic link (public)
///     │   ├── POST /verify             # Redeem it for a session (public)
///     │   └── POST /logout             # Acknowledge logout
///     ├── /users/
///     │   ├── GET   /me                # Current user profile
///     │   └── PATCH /me                # Update name / avatar color
///     ├── /households/
///     │   ├── POST /                   # Create and join
///     │   ├── POST /join               # Join by invite code
///     │   ├── GET  /current            # Household with members
///     │   └── POST /leave              # Leave
///     └── /tasks/
///         ├── GET    /                 # Active tasks
///         ├── POST   /                 # Create task
///         ├── GET    /completed        # Recently completed
///         ├── POST   /:id/claim        # Claim
///         ├── POST   /:id/unclaim      # Release claim
///         ├── POST   /:id/complete     # Complete
///         ├── POST   /:id/uncomplete   # Reopen
///         └── DELETE /:id              # Delete
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Session authentication (everything under /api except the two
///    public auth endpoints)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Magic-link request and redemption happen before a session exists
    let public_auth_routes = Router::new()
        .route("/auth/magic-link", post(routes::auth::request_magic_link))
        .route("/auth/verify", post(routes::auth::verify_magic_link));

    // Everything else requires a valid session token
    let protected_routes = Router::new()
        .route("/auth/logout", post(routes::auth::logout))
        .route("/users/me", get(routes::users::get_me))
        .route("/users/me", patch(routes::users::update_me))
        .route("/households", post(routes::households::create_household))
        .route("/households/join", post(routes::households::join_household))
        .route(
            "/households/current",
            get(routes::households::current_household),
        )
        .route("/households/leave", post(routes::households::leave_household))
        .route("/tasks", get(routes::tasks::list_active_tasks))
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks/completed", get(routes::tasks::list_completed_tasks))
        .route("/tasks/:id/claim", post(routes::tasks::claim_task))
        .route("/tasks/:id/unclaim", post(routes::tasks::unclaim_task))
        .route("/tasks/:id/complete", post(routes::tasks::complete_task))
        .route("/tasks/:id/uncomplete", post(routes::tasks::uncomplete_task))
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_user,
        ));

    let api_routes = public_auth_routes.merge(protected_routes);

    let origins: Vec<HeaderValue> = state
        .config
        .frontend
        .cors_origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
