/// Middleware modules for the API server
///
/// This module contains custom middleware for:
/// - Session authentication guard
/// - No-store cache headers

pub mod auth;
pub mod cache;
