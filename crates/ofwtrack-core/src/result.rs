//! Convenience result type alias for OFW Track.

use crate::error::AppError;

/// A specialized `Result` type for OFW Track operations.
pub type AppResult<T> = Result<T, AppError>;
