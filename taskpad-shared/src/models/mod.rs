/// Database models for Taskpad
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `project`: Projects grouping tasks
/// - `task`: Tasks belonging to a project
///
/// # Example
///
/// ```no_run
/// use taskpad_shared::models::user::{CreateUser, User};
/// use taskpad_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod project;
pub mod task;
pub mod user;
