//! # ofwtrack-database
//!
//! Persistence collaborators of the notification engine:
//!
//! - [`traits::NotificationStore`]: durable append-only notification table
//! - [`traits::DirectoryLookup`]: read-only user directory
//!
//! Each trait has a PostgreSQL repository and an in-memory implementation
//! used by tests and single-process deployments.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod traits;

pub use connection::DatabasePool;
pub use traits::{DirectoryLookup, NotificationStore};
