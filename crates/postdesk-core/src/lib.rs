//! # Postdesk Core
//!
//! The domain layer of the Postdesk content API.
//! This crate contains the post resource model (projections, filters,
//! pagination, operation table), the storage ports and the post service.
//! It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
