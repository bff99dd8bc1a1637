/// Authentication endpoints
///
/// Passwordless magic-link sign-in:
///
/// - `POST /api/auth/magic-link` - Request a sign-in token for an email
/// - `POST /api/auth/verify` - Exchange a magic token for a session token
/// - `POST /api/auth/logout` - Logout (client discards the session token)
///
/// There is no email delivery; the magic link is returned directly in the
/// response for the caller to present.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::CurrentUser,
};
use axum::{extract::State, Extension, Json};
use chrono::Utc;
use hearth_shared::{
    auth::{
        jwt::create_session_token,
        token::{generate_magic_token, magic_token_expiry},
    },
    models::user::User,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

/// Magic link request
#[derive(Debug, Deserialize, Validate)]
pub struct MagicLinkRequest {
    /// Email address to sign in with
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Magic link verification request
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// The magic token from the link
    pub token: String,
}

/// Session token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Signed session token (30 days)
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// Request a magic link for sign in
///
/// Finds or creates the user for the normalized email, then issues a fresh
/// magic token valid for 15 minutes. Requesting again reuses the same user
/// record but replaces the token.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/magic-link
/// Content-Type: application/json
///
/// { "email": "user@example.com" }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Invalid email format
pub async fn request_magic_link(
    State(state): State<AppState>,
    Json(req): Json<MagicLinkRequest>,
) -> ApiResult<Json<Value>> {
    req.validate()?;

    let email = req.email.to_lowercase();

    let token = generate_magic_token();
    let expires = magic_token_expiry();

    let mut tx = state.db.begin().await?;

    let user = match User::find_by_email(&mut *tx, &email).await? {
        Some(user) => user,
        None => User::create(&mut *tx, &email).await?,
    };

    User::set_magic_token(&mut *tx, user.id, &token, expires).await?;

    tx.commit().await?;

    tracing::info!(user_id = %user.id, "Issued magic link");

    // In production this link would be emailed; here it is returned directly.
    Ok(Json(json!({
        "message": "Magic link created",
        "magic_link": state.config.frontend.magic_link(&token),
        "token": token,
    })))
}

/// Verify a magic link token and return a session token
///
/// Magic tokens are single use: the token is cleared before the session
/// token is issued, so a second verification with the same token fails.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/verify
/// Content-Type: application/json
///
/// { "token": "..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Unknown token, or token past its expiry
pub async fn verify_magic_link(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let mut tx = state.db.begin().await?;

    let user = User::find_by_magic_token(&mut *tx, &req.token)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Invalid token".to_string()))?;

    // Both magic columns are set together; a missing expiry means the row
    // violates that invariant and the token cannot be trusted.
    let expires = user
        .magic_token_expires
        .ok_or_else(|| ApiError::BadRequest("Invalid token".to_string()))?;

    if expires < Utc::now() {
        return Err(ApiError::BadRequest("Token expired".to_string()));
    }

    User::clear_magic_token(&mut *tx, user.id).await?;

    tx.commit().await?;

    let access_token = create_session_token(user.id, state.jwt_secret())
        .map_err(|e| ApiError::InternalError(format!("Token creation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "Magic link verified");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Logout
///
/// Sessions are stateless; the client simply discards its token.
pub async fn logout(Extension(CurrentUser(user)): Extension<CurrentUser>) -> ApiResult<Json<Value>> {
    tracing::info!(user_id = %user.id, "User logged out");
    Ok(Json(json!({ "message": "Logged out" })))
}
