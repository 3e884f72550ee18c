//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories for database-less runs and tests
//! - **lei**: reqwest client for the LEI registry
//! - **password**: Argon2id password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They hold no business rules.

pub mod lei;
pub mod memory;
pub mod password;
pub mod persistence;
