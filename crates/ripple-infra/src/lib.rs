//! # Ripple Infrastructure
//!
//! Concrete implementations of the ports defined in `ripple-core`.
//! This crate contains the nested-document post store, the user repository
//! and the authentication services.
//!
//! ## Feature Flags
//!
//! - `mongo` (default) - MongoDB-backed store and user repository
//!
//! Without `mongo`, the in-memory implementations are the only backends;
//! they are also what the server falls back to when MongoDB is unreachable.

pub mod auth;
pub mod store;
pub mod users;

// Re-exports - In-Memory
pub use store::InMemoryPostStore;
pub use users::InMemoryUserRepository;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

// Re-exports - MongoDB
#[cfg(feature = "mongo")]
pub use store::{MongoConfig, MongoPostStore};
#[cfg(feature = "mongo")]
pub use users::MongoUserRepository;
