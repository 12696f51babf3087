/// Authentication utilities
///
/// This module provides the authentication primitives for Taskpad:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`credentials`]: Username/password check against the credential store
/// - [`session`]: Session-backed login state (cookie-carried, store-persisted)
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Constant-time Comparison**: Verification uses the hashing
///   primitive's compare; plaintext is never compared to plaintext
/// - **Session Fixation**: The session id is cycled on every login
///
/// # Example
///
/// ```no_run
/// use taskpad_shared::auth::credentials::verify_credentials;
/// use taskpad_shared::auth::password::hash_password;
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// // ... store hash, then later:
/// let user = verify_credentials(&pool, "alice", "user_password").await?;
/// # Ok(())
/// # }
/// ```

pub mod credentials;
pub mod password;
pub mod session;
