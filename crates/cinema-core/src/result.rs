//! Convenience result type alias.

use crate::error::AppError;

/// A specialized `Result` type for booking operations.
///
/// Every crate uses this instead of spelling out `Result<T, AppError>`.
pub type AppResult<T> = Result<T, AppError>;
