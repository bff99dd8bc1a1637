/// Liveness endpoint
///
/// `GET /health` is the one route outside `/api` and outside
/// authentication. It answers whether the process is up and whether the
/// SQLite store behind it still responds, so a reverse proxy or uptime
/// monitor can poll it without credentials.
///
/// A reachable database reports `"healthy"`; a failed probe degrades the
/// status but still returns 200, leaving the interpretation to the caller.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Body of a health probe response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    /// Version of the running binary
    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,
}

/// Reports process liveness and database reachability
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_ok = sqlx::query("SELECT 1").fetch_one(&state.db).await.is_ok();

    let (status, database) = if database_ok {
        ("healthy", "connected")
    } else {
        ("degraded", "disconnected")
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    }))
}
