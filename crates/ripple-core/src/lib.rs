//! # Ripple Core
//!
//! The domain layer of the Ripple content API.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post aggregate, the store and user-repository ports, the post repository
//! adapter, the post domain service, and the viewer projection.

pub mod domain;
pub mod error;
pub mod ports;
pub mod projection;
pub mod repository;
pub mod service;

pub use error::PostError;
pub use repository::PostRepository;
pub use service::PostService;
