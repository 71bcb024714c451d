//! # Inkwell Infrastructure
//!
//! Concrete implementations of the ports defined in `inkwell-core`:
//! repositories, token and password services, and the token revocation list.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM; without it
//!   only the in-memory store is built

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, InMemoryTokenBlocklist, JwtConfig, JwtTokenService};
pub use database::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};
