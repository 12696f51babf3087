/// Credential verification
///
/// A pure function from (store, username, password) to a verified user.
/// Session establishment is a separate step in [`super::session`], so the
/// two concerns compose without callback threading.
///
/// The two rejection variants carry distinct, client-actionable messages
/// (so the client can offer a signup link for an unknown username), but
/// the API maps both to the same status code.

use sqlx::PgPool;

use super::password::{self, PasswordError};
use crate::models::user::User;

/// Why a credential check failed
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// No user with that username
    #[error("username does not exist, try signing up")]
    UnknownUsername,

    /// The password hash did not match
    #[error("invalid password")]
    InvalidPassword,

    /// The stored hash could not be processed
    #[error("password verification failed: {0}")]
    Hash(#[from] PasswordError),

    /// The credential store could not be reached
    #[error("credential lookup failed: {0}")]
    Store(#[from] sqlx::Error),
}

impl CredentialError {
    /// Whether this is an expected rejection (bad input) rather than a
    /// store or hashing failure
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CredentialError::UnknownUsername | CredentialError::InvalidPassword
        )
    }
}

/// Verifies a username/password pair against the credential store
///
/// Looks the user up by username and verifies the password against the
/// stored Argon2id hash. Plaintext is never compared to plaintext.
///
/// # Errors
///
/// - [`CredentialError::UnknownUsername`] if no such user exists
/// - [`CredentialError::InvalidPassword`] if the hash doesn't match
/// - [`CredentialError::Store`] / [`CredentialError::Hash`] on
///   infrastructure failure
pub async fn verify_credentials(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<User, CredentialError> {
    let user = User::find_by_username(pool, username)
        .await?
        .ok_or(CredentialError::UnknownUsername)?;

    if !password::verify_password(password, &user.password_hash)? {
        return Err(CredentialError::InvalidPassword);
    }

    Ok(user)
}
