/// Authentication primitives for Hearth
///
/// # Modules
///
/// - [`token`]: magic sign-in tokens and household invite codes
/// - [`jwt`]: signed session tokens (HS256) handed out after verification
///
/// # Example
///
/// ```
/// use hearth_shared::auth::token::generate_magic_token;
/// use hearth_shared::auth::jwt::create_session_token;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let magic = generate_magic_token();
/// let session = create_session_token(Uuid::new_v4(), "secret-key-at-least-32-bytes-long!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod token;
