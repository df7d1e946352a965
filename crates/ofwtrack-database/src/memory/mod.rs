//! In-memory implementations of the collaborator traits.
//!
//! Used by tests and by single-process deployments that do not need
//! durable storage across restarts.

pub mod directory;
pub mod notification;

pub use directory::MemoryDirectory;
pub use notification::MemoryNotificationStore;
