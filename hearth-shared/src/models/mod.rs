/// Database models for Hearth
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: accounts, magic-token state, household affiliation
/// - `household`: the sharing scope, with invite codes
/// - `task`: the shared task list with claim/complete lifecycle
///
/// # Example
///
/// ```no_run
/// use hearth_shared::models::user::User;
/// use hearth_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let user = User::create(&pool, "user@example.com").await?;
/// # Ok(())
/// # }
/// ```

pub mod household;
pub mod task;
pub mod user;
