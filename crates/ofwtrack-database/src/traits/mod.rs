//! Collaborator traits consumed by the notification engine.

pub mod directory;
pub mod notification_store;

pub use directory::DirectoryLookup;
pub use notification_store::NotificationStore;
