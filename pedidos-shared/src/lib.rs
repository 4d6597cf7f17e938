//! # Pedidos Shared Library
//!
//! This crate contains the database models, connection pool, and auth
//! utilities shared by the pedidos API server and its integration tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their query methods
//! - `db`: Connection pool and migration runner
//! - `auth`: JWT token and password hashing utilities

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the pedidos shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
