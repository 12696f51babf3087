//! # Taskpad Shared Library
//!
//! This crate contains the data layer and authentication primitives used by
//! the Taskpad API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Password hashing, credential checks, and session state
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskpad shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
