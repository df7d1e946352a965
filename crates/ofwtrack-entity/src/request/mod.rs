//! Request snapshot entities supplied by the caller at event time.

pub mod approval;
pub mod snapshot;
pub mod status;

pub use approval::ApprovalType;
pub use snapshot::RequestSnapshot;
pub use status::RequestStatus;
