//! Host adapter boundary wrapping the platform permission primitives.

use async_trait::async_trait;
use petition_protocol::{HostError, Permission};
use std::collections::HashMap;

/// Platform binding consumed by the orchestrator.
///
/// Implementations wrap whatever the host platform offers for checking and
/// requesting permissions. The orchestrator never interprets permission
/// names; it only routes them through these four operations.
#[async_trait]
pub trait HostAdapter: Send + Sync {
    /// Whether the permission is currently granted. Synchronous, no side
    /// effects.
    fn check_permission(&self, permission: &str) -> bool;

    /// Platform heuristic for "user previously denied without permanent
    /// dismissal". The permanently-denied bookkeeping behind it is opaque
    /// to this library.
    fn should_show_rationale(&self, permission: &str) -> bool;

    /// Issue the platform request and await the user's answer. The only
    /// operation that may show a system dialog; the wait is unbounded.
    ///
    /// A permission missing from the returned map counts as denied.
    async fn request_permissions(
        &self,
        permissions: &[Permission],
    ) -> Result<HashMap<Permission, bool>, HostError>;

    /// Navigate to the application's settings screen. Fire and forget.
    fn open_app_settings(&self);
}
