//! Notification dispatch: persist, then push best-effort.

pub mod dispatcher;
pub mod report;

pub use dispatcher::DispatchService;
pub use report::{DispatchReport, PushFailure, PushFailureReason};
