//! Typed path parameter helpers.

use std::str::FromStr;

use cinema_core::error::AppError;

/// Parses a typed identifier from a path segment.
///
/// Malformed ids are reported as not found, the same as unknown ones.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, AppError> {
    s.parse()
        .map_err(|_| AppError::not_found(format!("No resource with id '{s}'")).with_code("INVALID_ID"))
}
