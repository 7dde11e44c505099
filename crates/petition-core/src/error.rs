//! Error types for the core request pipeline.

use thiserror::Error;

/// Errors returned synchronously by `request()` and `execute()`.
///
/// Host adapter failures are deliberately absent: they are recovered
/// internally by classifying pending permissions as denied, so the caller
/// only ever observes them through the result callback.
#[derive(Debug, Error)]
pub enum PetitionError {
    /// No permissions were configured before the request was issued.
    #[error("no permissions specified")]
    EmptyPermissionSet,
    /// The orchestrator already has a request in flight.
    #[error("permission request already in flight")]
    RequestInFlight,
    /// One or more permissions are throttled by the rate limiter.
    #[error("permission request rate limited: {0}")]
    RateLimited(String),
}
