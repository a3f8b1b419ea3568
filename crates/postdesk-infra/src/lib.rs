//! # Postdesk Infrastructure
//!
//! Concrete implementations of the storage ports defined in `postdesk-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
pub use memory::InMemoryStore;
