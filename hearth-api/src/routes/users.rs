/// User profile endpoints
///
/// - `GET /api/users/me` - Current user's profile
/// - `PATCH /api/users/me` - Update display name and/or avatar color

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::CurrentUser,
};
use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use hearth_shared::models::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// User profile response
///
/// The magic token state is internal and never serialized here.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub avatar_color: String,
    pub household_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            avatar_color: user.avatar_color,
            household_id: user.household_id,
            created_at: user.created_at,
        }
    }
}

/// Profile update request
///
/// Fields left out of the body are not touched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// New avatar color, as a hex string like "#f97316"
    #[validate(custom(
        function = "validate_hex_color",
        message = "Avatar color must be a hex color like #f97316"
    ))]
    pub avatar_color: Option<String>,
}

/// Validates a hex color of the form `#rrggbb`
fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color"))
    }
}

/// Get the current user's profile
pub async fn get_me(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<UserResponse>> {
    Ok(Json(user.into()))
}

/// Update the current user's profile
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid session token
/// - `422 Unprocessable Entity`: Name too long or malformed avatar color
pub async fn update_me(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate()?;

    let updated = User::update_profile(
        &state.db,
        user.id,
        req.name.as_deref(),
        req.avatar_color.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#f97316").is_ok());
        assert!(validate_hex_color("#ABCDEF").is_ok());

        assert!(validate_hex_color("f97316").is_err());
        assert!(validate_hex_color("#f9731").is_err());
        assert!(validate_hex_color("#f97316ff").is_err());
        assert!(validate_hex_color("#zzzzzz").is_err());
    }
}
