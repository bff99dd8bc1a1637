/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Magic-link authentication endpoints
/// - `users`: Current-user profile endpoints
/// - `households`: Household membership endpoints
/// - `tasks`: Shared task endpoints

pub mod health;
pub mod auth;
pub mod users;
pub mod households;
pub mod tasks;
