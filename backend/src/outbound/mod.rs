//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed region repository using Diesel
//! - **memory**: in-process region repository for database-less runs
//! - **assets**: capability-scoped upload directory
//! - **payments**: reqwest-backed payment provider gateway
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod assets;
pub mod memory;
pub mod payments;
pub mod persistence;
