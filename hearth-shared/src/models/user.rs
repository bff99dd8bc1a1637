/// User model and database operations
///
/// Users are created lazily on their first magic-link request, keyed by
/// normalized (lowercase) email. A user belongs to at most one household at
/// a time via `household_id`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id                  BLOB PRIMARY KEY,
///     email               TEXT NOT NULL UNIQUE,
///     name                TEXT,
///     avatar_color        TEXT NOT NULL DEFAULT '#f97316',
///     household_id        BLOB REFERENCES households (id),
///     magic_token         TEXT,
///     magic_token_expires TEXT,
///     created_at          TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use hearth_shared::models::user::User;
/// use hearth_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, "user@example.com").await?;
/// let found = User::find_by_email(&pool, "user@example.com").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite};
use uuid::Uuid;

/// Default avatar color assigned to new users
pub const DEFAULT_AVATAR_COLOR: &str = "#f97316";

const USER_COLUMNS: &str =
    "id, email, name, avatar_color, household_id, magic_token, magic_token_expires, created_at";

/// User model representing an account
///
/// The magic token fields are set only while a sign-in is in flight; both
/// are set together or null together.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address, stored lowercase, unique across all users
    pub email: String,

    /// Optional display name
    pub name: Option<String>,

    /// Hex color used for the user's avatar
    pub avatar_color: String,

    /// Household this user belongs to (None = unaffiliated)
    pub household_id: Option<Uuid>,

    /// Pending magic sign-in token, cleared on successful verification
    #[serde(skip_serializing, default)]
    pub magic_token: Option<String>,

    /// Expiry of the pending magic token
    #[serde(skip_serializing, default)]
    pub magic_token_expires: Option<DateTime<Utc>>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Minimal user representation embedded in household and task responses
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserBrief {
    /// User ID
    pub id: Uuid,

    /// Optional display name
    pub name: Option<String>,

    /// Hex color used for the user's avatar
    pub avatar_color: String,
}

impl From<&User> for UserBrief {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar_color: user.avatar_color.to_string(),
        }
    }
}

impl User {
    /// Creates a new user with only an email address
    ///
    /// The caller is responsible for normalizing the email to lowercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation) or the database operation fails.
    pub async fn create(
        db: impl Executor<'_, Database = Sqlite>,
        email: &str,
    ) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (id, email, avatar_color, created_at) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(DEFAULT_AVATAR_COLOR)
            .bind(Utc::now())
            .fetch_one(db)
            .await
    }

    /// Finds a user by ID
    pub async fn find_by_id(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Finds a user by email address
    ///
    /// The caller normalizes the email; lookups here are exact.
    pub async fn find_by_email(
        db: impl Executor<'_, Database = Sqlite>,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");

        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(db)
            .await
    }

    /// Finds a user by their pending magic token
    pub async fn find_by_magic_token(
        db: impl Executor<'_, Database = Sqlite>,
        token: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE magic_token = ?1");

        sqlx::query_as::<_, User>(&sql)
            .bind(token)
            .fetch_optional(db)
            .await
    }

    /// Stores a freshly issued magic token on a user
    ///
    /// Overwrites any previous token; only the most recently issued token
    /// can be verified.
    pub async fn set_magic_token(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET magic_token = ?2, magic_token_expires = ?3 WHERE id = ?1")
            .bind(id)
            .bind(token)
            .bind(expires)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Clears the magic token after successful verification
    ///
    /// Magic tokens are single use; both columns are nulled together.
    pub async fn clear_magic_token(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET magic_token = NULL, magic_token_expires = NULL WHERE id = ?1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Updates the user's profile fields
    ///
    /// Only fields that are `Some` are touched; `None` leaves the stored
    /// value as-is.
    pub async fn update_profile(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
        name: Option<&str>,
        avatar_color: Option<&str>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!(
            "UPDATE users SET \
                 name = COALESCE(?2, name), \
                 avatar_color = COALESCE(?3, avatar_color) \
             WHERE id = ?1 \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(name)
            .bind(avatar_color)
            .fetch_optional(db)
            .await
    }

    /// Sets or clears the user's household affiliation
    pub async fn set_household(
        db: impl Executor<'_, Database = Sqlite>,
        id: Uuid,
        household_id: Option<Uuid>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET household_id = ?2 WHERE id = ?1")
            .bind(id)
            .bind(household_id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Lists the members of a household as minimal user representations
    pub async fn list_by_household(
        db: impl Executor<'_, Database = Sqlite>,
        household_id: Uuid,
    ) -> Result<Vec<UserBrief>, sqlx::Error> {
        sqlx::query_as::<_, UserBrief>(
            "SELECT id, name, avatar_color FROM users \
             WHERE household_id = ?1 \
             ORDER BY created_at ASC",
        )
        .bind(household_id)
        .fetch_all(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_brief_from_user() {
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: Some("Test User".to_string()),
            avatar_color: DEFAULT_AVATAR_COLOR.to_string(),
            household_id: None,
            magic_token: None,
            magic_token_expires: None,
            created_at: Utc::now(),
        };

        let brief = UserBrief::from(&user);
        assert_eq!(brief.id, user.id);
        assert_eq!(brief.name.as_deref(), Some("Test User"));
        assert_eq!(brief.avatar_color, "#f97316");
    }

    #[test]
    fn test_magic_token_is_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: None,
            avatar_color: DEFAULT_AVATAR_COLOR.to_string(),
            household_id: None,
            magic_token: Some("secret-token".to_string()),
            magic_token_expires: Some(Utc::now()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-token"));
        assert!(!json.contains("magic_token"));
    }

    // Integration tests for database operations are in hearth-api/tests/.
}
