// Public (no auth) and protected (bearer auth) handler tiers
pub mod protected;
pub mod public;

pub use protected::*;
pub use public::*;

use crate::error::ApiError;

/// Fallback for every unrouted path
pub async fn not_found() -> ApiError {
    ApiError::not_found("Endpoint not found")
}

/// Known path, unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Method not allowed for this endpoint")
}
