use thiserror::Error;

/// Errors surfaced by a host adapter's platform bindings.
///
/// The orchestrator never forwards these to the caller; every variant is
/// recovered by classifying the still-pending permissions as denied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The underlying platform call failed.
    #[error("platform call failed: {0}")]
    Platform(String),
    /// The owning UI context was destroyed while the request was in flight.
    #[error("host context destroyed")]
    ContextDestroyed,
    /// The host already has an outstanding permission request.
    #[error("host rejected overlapping permission request")]
    Busy,
}
