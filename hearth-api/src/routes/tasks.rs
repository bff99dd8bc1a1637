/// Task endpoints
///
/// Tasks live inside a household and are visible to every member. Claiming
/// and completing are independent: anyone can complete a task regardless of
/// who (if anyone) claimed it.
///
/// - `GET /api/tasks` - Active (incomplete) tasks
/// - `POST /api/tasks` - Create a task
/// - `GET /api/tasks/completed` - Recently completed tasks
/// - `POST /api/tasks/:id/claim` - Claim a task
/// - `POST /api/tasks/:id/unclaim` - Release a claim
/// - `POST /api/tasks/:id/complete` - Mark complete
/// - `POST /api/tasks/:id/uncomplete` - Reopen a completed task
/// - `DELETE /api/tasks/:id` - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    middleware::auth::CurrentUser,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use hearth_shared::models::{
    task::{Task, TaskWithUsers},
    user::{User, UserBrief},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Task creation request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

/// Task response with embedded user summaries
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub household_id: Uuid,
    pub title: String,
    pub claimed_by: Option<Uuid>,
    pub completed_by: Option<Uuid>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub created_by_user: UserBrief,
    pub claimed_by_user: Option<UserBrief>,
    pub completed_by_user: Option<UserBrief>,
}

impl From<TaskWithUsers> for TaskResponse {
    fn from(tw: TaskWithUsers) -> Self {
        Self {
            id: tw.task.id,
            household_id: tw.task.household_id,
            title: tw.task.title,
            claimed_by: tw.task.claimed_by,
            completed_by: tw.task.completed_by,
            completed_at: tw.task.completed_at,
            created_by: tw.task.created_by,
            created_at: tw.task.created_at,
            created_by_user: tw.created_by_user,
            claimed_by_user: tw.claimed_by_user,
            completed_by_user: tw.completed_by_user,
        }
    }
}

/// Every task operation requires household membership.
fn require_household(user: &User) -> ApiResult<Uuid> {
    user.household_id
        .ok_or_else(|| ApiError::BadRequest("Not in a household".to_string()))
}

/// Fetch a task with its user summaries, after a mutation confirmed it exists.
async fn fetch_task_response(
    state: &AppState,
    task_id: Uuid,
    household_id: Uuid,
) -> ApiResult<Json<TaskResponse>> {
    let tw = Task::find_with_users(&state.db, task_id, household_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;
    Ok(Json(TaskResponse::from(tw)))
}

/// List active (incomplete) tasks, newest first
pub async fn list_active_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let household_id = require_household(&user)?;

    let tasks = Task::list_active(&state.db, household_id).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// List tasks completed within the retention window, most recent first
pub async fn list_completed_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let household_id = require_household(&user)?;

    let tasks = Task::list_completed(&state.db, household_id).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Create a task in the current household
///
/// # Errors
///
/// - `400 Bad Request`: Not in a household
/// - `422 Unprocessable Entity`: Empty or whitespace-only title
pub async fn create_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let household_id = require_household(&user)?;

    let title = req.title.trim();
    if title.is_empty() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "title".to_string(),
            message: "Title must not be empty".to_string(),
        }]));
    }

    let task = Task::create(&state.db, household_id, user.id, title).await?;

    tracing::info!(task_id = %task.id, household_id = %household_id, "Task created");

    // A freshly created task has no claimant or completer, so the creator's
    // brief is the only user summary needed.
    let created_by_user = UserBrief::from(&user);
    Ok(Json(TaskResponse {
        id: task.id,
        household_id: task.household_id,
        title: task.title,
        claimed_by: None,
        completed_by: None,
        completed_at: None,
        created_by: task.created_by,
        created_at: task.created_at,
        created_by_user,
        claimed_by_user: None,
        completed_by_user: None,
    }))
}

/// Claim a task for the current user
///
/// Claiming is advisory: it overwrites any existing claim rather than
/// failing, so the most recent claimant wins.
pub async fn claim_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let household_id = require_household(&user)?;

    Task::set_claimed(&state.db, task_id, household_id, Some(user.id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    fetch_task_response(&state, task_id, household_id).await
}

/// Release the claim on a task
///
/// Any member may unclaim, not just the claimant.
pub async fn unclaim_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let household_id = require_household(&user)?;

    Task::set_claimed(&state.db, task_id, household_id, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    fetch_task_response(&state, task_id, household_id).await
}

/// Mark a task complete, crediting the current user
///
/// Completing an already-completed task re-credits it to the caller and
/// refreshes the completion timestamp.
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let household_id = require_household(&user)?;

    Task::complete(&state.db, task_id, household_id, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    tracing::debug!(task_id = %task_id, user_id = %user.id, "Task completed");

    fetch_task_response(&state, task_id, household_id).await
}

/// Reopen a completed task
///
/// Clears both the completer and the completion timestamp, returning the
/// task to the active list. The claim, if any, is untouched.
pub async fn uncomplete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let household_id = require_household(&user)?;

    Task::uncomplete(&state.db, task_id, household_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    fetch_task_response(&state, task_id, household_id).await
}

/// Delete a task
///
/// Any household member may delete any task in the household.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let household_id = require_household(&user)?;

    let deleted = Task::delete(&state.db, task_id, household_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::info!(task_id = %task_id, "Task deleted");

    Ok(Json(json!({ "message": "Task deleted" })))
}
