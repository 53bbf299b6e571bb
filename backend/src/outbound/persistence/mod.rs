//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel row models and
//! domain types. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) never leave this module.
//!
//! # Example
//!
//! ```ignore
//! use pixelwall::outbound::persistence::{DbPool, DieselRegionRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pixels")).await?;
//! let repo = DieselRegionRepository::new(pool);
//! ```

mod diesel_region_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_region_repository::DieselRegionRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
