/// Task model and database operations
///
/// Tasks belong to exactly one household and carry two independent lifecycle
/// flags: a claim marker (`claimed_by`) and a completion marker
/// (`completed_by` + `completed_at`, set and cleared together). A task can
/// be completed without ever being claimed, and the completer need not be
/// the claimer.
///
/// Every lookup is scoped by household id; a task in another household is
/// indistinguishable from a missing one.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id           BLOB PRIMARY KEY,
///     household_id BLOB NOT NULL REFERENCES households (id) ON DELETE CASCADE,
///     title        TEXT NOT NULL,
///     claimed_by   BLOB REFERENCES users (id),
///     completed_by BLOB REFERENCES users (id),
///     completed_at TEXT,
///     created_by   BLOB NOT NULL REFERENCES users (id),
///     created_at   TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite};
use uuid::Uuid;

use super::user::UserBrief;

/// How long completed tasks stay visible in the completed view (days)
pub const COMPLETED_RETENTION_DAYS: i64 = 7;

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Household this task belongs to
    pub household_id: Uuid,

    /// Task title, trimmed of surrounding whitespace
    pub title: String,

    /// Member who has claimed the task, if any
    pub claimed_by: Option<Uuid>,

    /// Member who completed the task; set iff `completed_at` is set
    pub completed_by: Option<Uuid>,

    /// When the task was completed
    pub completed_at: Option<DateTime<Utc>>,

    /// User who created the task
    pub created_by: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// A task together with the minimal user records it references
///
/// Produced by explicit joins; references to users who have since left the
/// household still resolve (users are never deleted).
#[derive(Debug, Clone)]
pub struct TaskWithUsers {
    pub task: Task,
    pub created_by_user: UserBrief,
    pub claimed_by_user: Option<UserBrief>,
    pub completed_by_user: Option<UserBrief>,
}

/// Flat row shape for the task + users join
#[derive(Debug, sqlx::FromRow)]
struct TaskUserRow {
    id: Uuid,
    household_id: Uuid,
    title: String,
    claimed_by: Option<Uuid>,
    completed_by: Option<Uuid>,
    completed_at: Option<DateTime<Utc>>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    created_by_name: Option<String>,
    created_by_color: String,
    claimed_by_name: Option<String>,
    claimed_by_color: Option<String>,
    completed_by_name: Option<String>,
    completed_by_color: Option<String>,
}

impl From<TaskUserRow> for TaskWithUsers {
    fn from(row: TaskUserRow) -> Self {
        let created_by_user = UserBrief {
            id: row.created_by,
            name: row.created_by_name,
            avatar_color: row.created_by_color,
        };

        // The joined color columns are non-null exactly when the referenced
        // user exists; users are never deleted, so a set reference always
        // resolves.
        let claimed_by_user = match (row.claimed_by, row.claimed_by_color) {
            (Some(id), Some(avatar_color)) => Some(UserBrief {
                id,
                name: row.claimed_by_name,
                avatar_color,
            }),
            _ => None,
        };

        let completed_by_user = match (row.completed_by, row.completed_by_color) {
            (Some(id), Some(avatar_color)) => Some(UserBrief {
                id,
                name: row.completed_by_name,
                avatar_color,
            }),
            _ => None,
        };

        Self {
            task: Task {
                id: row.id,
                household_id: row.household_id,
                title: row.title,
                claimed_by: row.claimed_by,
                completed_by: row.completed_by,
                completed_at: row.completed_at,
                created_by: row.created_by,
                created_at: row.created_at,
            },
            created_by_user,
            claimed_by_user,
            completed_by_user,
        }
    }
}

const TASK_USER_SELECT: &str = "SELECT \
        t.id, t.household_id, t.title, t.claimed_by, t.completed_by, \
        t.completed_at, t.created_by, t.created_at, \
        cu.name AS created_by_name, cu.avatar_color AS created_by_color, \
        lu.name AS claimed_by_name, lu.avatar_color AS claimed_by_color, \
        du.name AS completed_by_name, du.avatar_color AS completed_by_color \
     FROM tasks t \
     JOIN users cu ON cu.id = t.created_by \
     LEFT JOIN users lu ON lu.id = t.claimed_by \
     LEFT JOIN users du ON du.id = t.completed_by";

impl Task {
    /// Creates a new task in a household
    ///
    /// The caller trims and validates the title.
    pub async fn create(
        db: impl Executor<'_, Database = Sqlite>,
        household_id: Uuid,
        created_by: Uuid,
        title: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, household_id, title, created_by, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             RETURNING id, household_id, title, claimed_by, completed_by, \
                       completed_at, created_by, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(household_id)
        .bind(title)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(db)
        .await
    }

    /// Fetches a task with its referenced users, scoped to a household
    ///
    /// Returns `None` both for a missing task and for a task belonging to a
    /// different household.
    pub async fn find_with_users(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
        household_id: Uuid,
    ) -> Result<Option<TaskWithUsers>, sqlx::Error> {
        let sql = format!("{TASK_USER_SELECT} WHERE t.id = ?1 AND t.household_id = ?2");

        let row = sqlx::query_as::<_, TaskUserRow>(&sql)
            .bind(id)
            .bind(household_id)
            .fetch_optional(db)
            .await?;

        Ok(row.map(TaskWithUsers::from))
    }

    /// Lists a household's active (uncompleted) tasks, newest first
    pub async fn list_active(
        db: impl Executor<'_, Database = Sqlite>,
        household_id: Uuid,
    ) -> Result<Vec<TaskWithUsers>, sqlx::Error> {
        let sql = format!(
            "{TASK_USER_SELECT} \
             WHERE t.household_id = ?1 AND t.completed_at IS NULL \
             ORDER BY t.created_at DESC"
        );

        let rows = sqlx::query_as::<_, TaskUserRow>(&sql)
            .bind(household_id)
            .fetch_all(db)
            .await?;

        Ok(rows.into_iter().map(TaskWithUsers::from).collect())
    }

    /// Lists a household's recently completed tasks, newest completion first
    ///
    /// Only tasks completed within the last [`COMPLETED_RETENTION_DAYS`]
    /// days are returned. Older completions are not deleted, but they never
    /// appear in this view again.
    pub async fn list_completed(
        db: impl Executor<'_, Database = Sqlite>,
        household_id: Uuid,
    ) -> Result<Vec<TaskWithUsers>, sqlx::Error> {
        let cutoff = Utc::now() - Duration::days(COMPLETED_RETENTION_DAYS);

        let sql = format!(
            "{TASK_USER_SELECT} \
             WHERE t.household_id = ?1 \
               AND t.completed_at IS NOT NULL \
               AND t.completed_at >= ?2 \
             ORDER BY t.completed_at DESC"
        );

        let rows = sqlx::query_as::<_, TaskUserRow>(&sql)
            .bind(household_id)
            .bind(cutoff)
            .fetch_all(db)
            .await?;

        Ok(rows.into_iter().map(TaskWithUsers::from).collect())
    }

    /// Sets or clears the claim marker on a task
    ///
    /// Last write wins; there is no conflict check against an existing
    /// claimer, and any household member may unclaim any task.
    ///
    /// Returns `None` if the task does not exist in this household.
    pub async fn set_claimed(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
        household_id: Uuid,
        claimed_by: Option<Uuid>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET claimed_by = ?3 \
             WHERE id = ?1 AND household_id = ?2 \
             RETURNING id, household_id, title, claimed_by, completed_by, \
                       completed_at, created_by, created_at",
        )
        .bind(id)
        .bind(household_id)
        .bind(claimed_by)
        .fetch_optional(db)
        .await
    }

    /// Marks a task completed by a user
    ///
    /// Re-completing overwrites the previous completer and timestamp.
    pub async fn complete(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
        household_id: Uuid,
        completed_by: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET completed_by = ?3, completed_at = ?4 \
             WHERE id = ?1 AND household_id = ?2 \
             RETURNING id, household_id, title, claimed_by, completed_by, \
                       completed_at, created_by, created_at",
        )
        .bind(id)
        .bind(household_id)
        .bind(completed_by)
        .bind(Utc::now())
        .fetch_optional(db)
        .await
    }

    /// Clears a task's completion marker unconditionally
    pub async fn uncomplete(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
        household_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET completed_by = NULL, completed_at = NULL \
             WHERE id = ?1 AND household_id = ?2 \
             RETURNING id, household_id, title, claimed_by, completed_by, \
                       completed_at, created_by, created_at",
        )
        .bind(id)
        .bind(household_id)
        .fetch_optional(db)
        .await
    }

    /// Permanently deletes a task
    ///
    /// Returns `true` if a task was deleted, `false` if no task matched the
    /// id within this household. No soft delete, no recovery.
    pub async fn delete(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
        household_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1 AND household_id = ?2")
            .bind(id)
            .bind(household_id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> TaskUserRow {
        TaskUserRow {
            id: Uuid::new_v4(),
            household_id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            claimed_by: None,
            completed_by: None,
            completed_at: None,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            created_by_name: Some("Alice".to_string()),
            created_by_color: "#f97316".to_string(),
            claimed_by_name: None,
            claimed_by_color: None,
            completed_by_name: None,
            completed_by_color: None,
        }
    }

    #[test]
    fn test_row_conversion_unclaimed() {
        let row = sample_row();
        let created_by = row.created_by;

        let with_users = TaskWithUsers::from(row);
        assert_eq!(with_users.created_by_user.id, created_by);
        assert_eq!(with_users.created_by_user.name.as_deref(), Some("Alice"));
        assert!(with_users.claimed_by_user.is_none());
        assert!(with_users.completed_by_user.is_none());
    }

    #[test]
    fn test_row_conversion_claimed() {
        let claimer = Uuid::new_v4();
        let mut row = sample_row();
        row.claimed_by = Some(claimer);
        row.claimed_by_name = None;
        row.claimed_by_color = Some("#22c55e".to_string());

        let with_users = TaskWithUsers::from(row);
        let claimed = with_users.claimed_by_user.expect("claimer should resolve");
        assert_eq!(claimed.id, claimer);
        assert_eq!(claimed.avatar_color, "#22c55e");
        assert!(claimed.name.is_none());
    }

    // Integration tests for database operations are in hearth-api/tests/.
}
