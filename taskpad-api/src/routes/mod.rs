/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, logout, check-session)
/// - `projects`: Project CRUD, including bulk delete
/// - `tasks`: Task CRUD, per-project bulk operations

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

/// Plain message response, used by every endpoint that has nothing else
/// to return
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    /// Builds a message response from anything stringy
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
