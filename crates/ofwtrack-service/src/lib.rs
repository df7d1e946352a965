//! # ofwtrack-service
//!
//! Business logic of the workflow notification engine:
//!
//! - [`notification::policy`]: declarative decision table mapping a
//!   workflow event to the audiences that must be told
//! - [`notification::RecipientResolver`]: expands audiences into concrete
//!   recipients through the directory
//! - [`notification::NotificationFactory`]: materializes notification rows
//! - [`notification::ReadStateManager`]: unread counts and read marking
//!
//! Services follow constructor injection: collaborators are handed in as
//! `Arc<dyn Trait>` at construction time.

pub mod notification;

pub use notification::{
    EventContext, NotificationFactory, ReadStateManager, RecipientResolver, Resolution,
    ResolutionEntry, ResolutionError, WorkflowEvent,
};
