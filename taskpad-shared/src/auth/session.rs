/// Session-backed login state
///
/// The session record lives in the store behind `tower-sessions` (a
/// PostgreSQL table in production), keyed by an opaque id carried in an
/// HTTP-only cookie, so login state survives process restarts. The
/// authenticated user's safe projection is the session payload; an absent
/// payload means anonymous.
///
/// All three operations take the request's [`Session`] explicitly; nothing
/// here reads ambient request state.

use serde::{Deserialize, Serialize};
use tower_sessions::{session, Session};
use uuid::Uuid;

use crate::models::user::User;

/// Key under which the authenticated user is stored in the session
pub const SESSION_USER_KEY: &str = "auth.user";

/// The user payload carried by an authenticated session
///
/// Holds only the safe projection (id and username), never the password
/// hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID
    pub id: Uuid,

    /// Username
    pub username: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Establishes an authenticated session for a user
///
/// Cycles the session id first (so a pre-login id cannot be replayed),
/// then writes the user payload. The write is awaited; the caller only
/// responds once the session state is in place.
///
/// # Errors
///
/// Returns an error if the session store write fails
pub async fn establish(session: &Session, user: &User) -> Result<(), session::Error> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, SessionUser::from(user)).await
}

/// Destroys the current session
///
/// Flushes the record from the store and clears the cookie. A store
/// failure is returned, not swallowed.
pub async fn clear(session: &Session) -> Result<(), session::Error> {
    session.flush().await
}

/// Reads the authenticated user for the requesting session
///
/// # Returns
///
/// `None` when no session exists or it is anonymous; that is not an
/// error
pub async fn current(session: &Session) -> Result<Option<SessionUser>, session::Error> {
    session.get::<SessionUser>(SESSION_USER_KEY).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_session_user_from_user() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            last_login_at: None,
        };

        let session_user = SessionUser::from(&user);
        assert_eq!(session_user.id, user.id);
        assert_eq!(session_user.username, "alice");

        // The payload that goes into the store must not carry the hash
        let json = serde_json::to_value(&session_user).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    // establish/clear/current are exercised through the auth integration
    // tests in taskpad-api/tests/
}
