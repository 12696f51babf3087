/// User model and database operations
///
/// This module provides the User model and the operations the
/// authentication flow needs. Users are created on registration and are
/// never deleted by any exposed route.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskpad_shared::models::user::{CreateUser, User};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "alice".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
///
/// let found = User::find_by_username(&pool, "alice").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User model representing a registered account
///
/// Passwords are stored as Argon2id hashes, never in plaintext. The hash is
/// never serialized; responses use [`SafeUser`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Username, unique across all users
    pub username: String,

    /// Argon2id password hash
    ///
    /// Never leaves the server: skipped on serialization.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the user last logged in (None if never logged in)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Username (must not collide with an existing account)
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,
}

/// The subset of [`User`] fields safe to return to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeUser {
    /// Unique user ID
    pub id: Uuid,

    /// Username
    pub username: String,
}

impl From<&User> for SafeUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Username already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at, last_login_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at, last_login_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates the last login timestamp for a user
    ///
    /// Called after successful authentication.
    ///
    /// # Returns
    ///
    /// True if the user was found and updated, false otherwise
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_user_projection() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            last_login_at: None,
        };

        let safe = SafeUser::from(&user);
        assert_eq!(safe.id, user.id);
        assert_eq!(safe.username, "alice");

        // The projection must not carry the hash anywhere
        let json = serde_json::to_value(&safe).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_user_serialization_skips_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "bob".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            last_login_at: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "bob");
    }

    // Integration tests for database operations are in taskpad-api/tests/
}
