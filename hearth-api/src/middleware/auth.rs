/// Bearer-token authentication middleware
///
/// Every protected request passes through [`require_user`], which resolves
/// the bearer credential to a full user record:
///
/// 1. Extract the token from the `Authorization` header
/// 2. Validate the session token signature and expiry
/// 3. Load the user row by id (a stale token referencing a deleted user is
///    treated the same as an invalid token)
/// 4. Insert a [`CurrentUser`] extension for downstream handlers
///
/// Failure at any step is terminal for the request and maps to 401.
///
/// # Example
///
/// ```ignore
/// use axum::Extension;
/// use hearth_api::middleware::auth::CurrentUser;
///
/// async fn handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> String {
///     format!("Hello, {}!", user.email)
/// }
/// ```

use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use hearth_shared::auth::jwt::validate_session_token;
use hearth_shared::models::user::User;

use crate::{app::AppState, error::ApiError};

/// The authenticated user, attached to request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authentication middleware for protected routes
///
/// # Errors
///
/// Returns 401 Unauthorized if the Authorization header is missing or
/// malformed, the token fails validation, or the user no longer exists.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = validate_session_token(token, state.jwt_secret())?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
