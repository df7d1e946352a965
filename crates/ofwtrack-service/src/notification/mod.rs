//! Workflow notification policy, resolution, construction, and read state.

pub mod event;
pub mod factory;
pub mod policy;
pub mod read_state;
pub mod resolver;

pub use event::{EventKind, WorkflowEvent};
pub use factory::{EventContext, NotificationFactory};
pub use policy::{Audience, PlannedNotice};
pub use read_state::ReadStateManager;
pub use resolver::{RecipientResolver, Resolution, ResolutionEntry, ResolutionError};
