/// Household model and database operations
///
/// A household is the sharing scope: the group of users who see the same
/// task list. Every household carries a unique 6-character invite code
/// generated at creation.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE households (
///     id          BLOB PRIMARY KEY,
///     name        TEXT NOT NULL,
///     invite_code TEXT NOT NULL UNIQUE,
///     created_at  TEXT NOT NULL
/// );
/// ```
///
/// Deleting a household cascades to its tasks (`ON DELETE CASCADE`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::auth::token::generate_invite_code;

/// How many invite codes to try before giving up
///
/// With a 36^6 key space a single collision is already unlikely; hitting
/// this cap means something is wrong with the randomness source.
const INVITE_CODE_ATTEMPTS: usize = 5;

/// Household model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Household {
    /// Unique household ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Unique 6-character uppercase alphanumeric invite code
    pub invite_code: String,

    /// When the household was created
    pub created_at: DateTime<Utc>,
}

impl Household {
    /// Creates a new household with a freshly generated invite code
    ///
    /// Uniqueness of the invite code is verified at insert time by the
    /// database constraint; on collision a new code is generated and the
    /// insert retried.
    ///
    /// Takes a connection rather than a pool so callers can run this inside
    /// the same transaction that assigns the creator's `household_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails for any reason other than an
    /// invite code collision, or if the retry budget is exhausted.
    pub async fn create(conn: &mut SqliteConnection, name: &str) -> Result<Self, sqlx::Error> {
        let mut last_err = None;

        for _ in 0..INVITE_CODE_ATTEMPTS {
            let code = generate_invite_code();

            let result = sqlx::query_as::<_, Household>(
                "INSERT INTO households (id, name, invite_code, created_at) \
                 VALUES (?1, ?2, ?3, ?4) \
                 RETURNING id, name, invite_code, created_at",
            )
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(&code)
            .bind(Utc::now())
            .fetch_one(&mut *conn)
            .await;

            match result {
                Ok(household) => return Ok(household),
                Err(e) if is_invite_code_collision(&e) => {
                    tracing::debug!(code, "Invite code collision, regenerating");
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            sqlx::Error::Protocol("Invite code generation exhausted retries".into())
        }))
    }

    /// Finds a household by ID
    pub async fn find_by_id(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Household>(
            "SELECT id, name, invite_code, created_at FROM households WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Finds a household by invite code
    ///
    /// Lookup is case-insensitive: the code is normalized to uppercase
    /// before matching, mirroring how codes are stored.
    pub async fn find_by_invite_code(
        db: impl Executor<'_, Database = Sqlite>,
        invite_code: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Household>(
            "SELECT id, name, invite_code, created_at FROM households WHERE invite_code = ?1",
        )
        .bind(invite_code.to_uppercase())
        .fetch_optional(db)
        .await
    }
}

fn is_invite_code_collision(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.message().contains("invite_code")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_detection_ignores_other_errors() {
        assert!(!is_invite_code_collision(&sqlx::Error::RowNotFound));
        assert!(!is_invite_code_collision(&sqlx::Error::Protocol(
            "invite_code".into()
        )));
    }

    // Integration tests for database operations are in hearth-api/tests/.
}
