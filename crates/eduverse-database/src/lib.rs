//! # eduverse-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all Eduverse entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::connect;
