/// Household endpoints
///
/// A household is the sharing scope: the group of users who see the same
/// task list. A user belongs to at most one household at a time.
///
/// - `POST /api/households` - Create a household and join it
/// - `POST /api/households/join` - Join via invite code
/// - `GET /api/households/current` - Current user's household with members
/// - `POST /api/households/leave` - Leave the current household

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::CurrentUser,
};
use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use hearth_shared::models::{
    household::Household,
    user::{User, UserBrief},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

/// Household creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHouseholdRequest {
    /// Household display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Household join request
#[derive(Debug, Deserialize)]
pub struct JoinHouseholdRequest {
    /// 6-character invite code (case-insensitive)
    pub invite_code: String,
}

/// Household response with member list
#[derive(Debug, Serialize)]
pub struct HouseholdResponse {
    pub id: Uuid,
    pub name: String,
    pub invite_code: String,
    pub created_at: DateTime<Utc>,
    pub members: Vec<UserBrief>,
}

impl HouseholdResponse {
    fn new(household: Household, members: Vec<UserBrief>) -> Self {
        Self {
            id: household.id,
            name: household.name,
            invite_code: household.invite_code,
            created_at: household.created_at,
            members,
        }
    }
}

/// Create a new household and join it
///
/// The household gets a freshly generated unique invite code, and the
/// creator's `household_id` is assigned in the same transaction.
///
/// # Errors
///
/// - `400 Bad Request`: Already in a household
/// - `422 Unprocessable Entity`: Missing or overlong name
pub async fn create_household(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreateHouseholdRequest>,
) -> ApiResult<Json<HouseholdResponse>> {
    req.validate()?;

    if user.household_id.is_some() {
        return Err(ApiError::Conflict("Already in a household".to_string()));
    }

    let mut tx = state.db.begin().await?;

    let household = Household::create(&mut tx, &req.name).await?;
    User::set_household(&mut *tx, user.id, Some(household.id)).await?;

    tx.commit().await?;

    tracing::info!(household_id = %household.id, user_id = %user.id, "Household created");

    // The creator is the only member at this point.
    let members = vec![UserBrief::from(&user)];
    Ok(Json(HouseholdResponse::new(household, members)))
}

/// Join an existing household using an invite code
///
/// Invite codes are matched case-insensitively.
///
/// # Errors
///
/// - `400 Bad Request`: Already in a household
/// - `404 Not Found`: No household with that invite code
pub async fn join_household(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<JoinHouseholdRequest>,
) -> ApiResult<Json<HouseholdResponse>> {
    if user.household_id.is_some() {
        return Err(ApiError::Conflict("Already in a household".to_string()));
    }

    let mut tx = state.db.begin().await?;

    let household = Household::find_by_invite_code(&mut *tx, &req.invite_code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invalid invite code".to_string()))?;

    User::set_household(&mut *tx, user.id, Some(household.id)).await?;

    tx.commit().await?;

    tracing::info!(household_id = %household.id, user_id = %user.id, "User joined household");

    let members = User::list_by_household(&state.db, household.id).await?;
    Ok(Json(HouseholdResponse::new(household, members)))
}

/// Get the current user's household with its member list
///
/// # Errors
///
/// - `404 Not Found`: Not in a household, or the referenced household is
///   missing (an orphan reference is not-found, not a server fault)
pub async fn current_household(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<HouseholdResponse>> {
    let household_id = user
        .household_id
        .ok_or_else(|| ApiError::NotFound("Not in a household".to_string()))?;

    let household = Household::find_by_id(&state.db, household_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Household not found".to_string()))?;

    let members = User::list_by_household(&state.db, household.id).await?;
    Ok(Json(HouseholdResponse::new(household, members)))
}

/// Leave the current household
///
/// Tasks the user created, claimed, or completed keep their references to
/// the departed user; they are not reassigned or deleted.
///
/// # Errors
///
/// - `400 Bad Request`: Not in a household
pub async fn leave_household(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Value>> {
    if user.household_id.is_none() {
        return Err(ApiError::BadRequest("Not in a household".to_string()));
    }

    User::set_household(&state.db, user.id, None).await?;

    tracing::info!(user_id = %user.id, "User left household");

    Ok(Json(json!({ "message": "Left household" })))
}
