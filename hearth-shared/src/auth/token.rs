/// Opaque token generation utilities
///
/// This module generates the two short-lived opaque strings used by the
/// sign-in and invite flows:
///
/// - **Magic tokens**: random URL-safe strings mailed (or, here, returned
///   directly) to a user to authenticate without a password. Single use,
///   valid for 15 minutes.
/// - **Invite codes**: 6-character uppercase alphanumeric codes allowing a
///   user to join an existing household.
///
/// # Security
///
/// - Uses `rand::thread_rng()` for cryptographic randomness
/// - Magic token key space: 62^43 ≈ 2^256, so no uniqueness check is needed
/// - Invite code key space: 36^6; uniqueness is enforced by the database
///   constraint, with regeneration on collision
///
/// # Example
///
/// ```
/// use hearth_shared::auth::token::{generate_magic_token, generate_invite_code};
///
/// let token = generate_magic_token();
/// assert_eq!(token.len(), 43);
///
/// let code = generate_invite_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
/// ```

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Length of a magic token (characters)
///
/// 43 base62 characters carry slightly more than 256 bits of entropy, the
/// same as `secrets.token_urlsafe(32)`-style tokens.
pub const MAGIC_TOKEN_LENGTH: usize = 43;

/// How long a magic token stays valid (minutes)
pub const MAGIC_TOKEN_LIFETIME_MINUTES: i64 = 15;

/// Length of a household invite code (characters)
pub const INVITE_CODE_LENGTH: usize = 6;

/// Generates a new magic sign-in token
///
/// Returns a random URL-safe base62 string. Collisions are negligible at
/// this entropy, so the caller persists it directly on the target user.
pub fn generate_magic_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    random_string(CHARSET, MAGIC_TOKEN_LENGTH)
}

/// Returns the expiry timestamp for a magic token issued now
pub fn magic_token_expiry() -> DateTime<Utc> {
    Utc::now() + Duration::minutes(MAGIC_TOKEN_LIFETIME_MINUTES)
}

/// Generates a household invite code
///
/// 6 uppercase alphanumeric characters. The database's unique constraint is
/// the uniqueness check; callers regenerate on collision.
pub fn generate_invite_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    random_string(CHARSET, INVITE_CODE_LENGTH)
}

fn random_string(charset: &[u8], length: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_token_format() {
        let token = generate_magic_token();
        assert_eq!(token.len(), MAGIC_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_magic_tokens_are_distinct() {
        assert_ne!(generate_magic_token(), generate_magic_token());
    }

    #[test]
    fn test_magic_token_expiry_is_in_the_future() {
        let expiry = magic_token_expiry();
        let delta = expiry - Utc::now();
        assert!(delta.num_minutes() >= MAGIC_TOKEN_LIFETIME_MINUTES - 1);
        assert!(delta.num_minutes() <= MAGIC_TOKEN_LIFETIME_MINUTES);
    }

    #[test]
    fn test_invite_code_format() {
        for _ in 0..32 {
            let code = generate_invite_code();
            assert_eq!(code.len(), INVITE_CODE_LENGTH);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}
