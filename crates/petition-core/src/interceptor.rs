//! Interceptor seam evaluated around the platform request.

use crate::request::RequestSpec;
use async_trait::async_trait;
use petition_protocol::PermissionResultSet;

/// Result of an interceptor evaluation before the platform request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptDecision {
    /// Keep evaluating and run the normal pipeline.
    Continue,
    /// Skip the rationale gate and go straight to the platform request.
    Bypass,
    /// Abort: classify all pending permissions as denied without asking
    /// the platform.
    Block,
}

/// Hook interface for extending the request pipeline.
///
/// `before_request` only runs when a platform request would actually be
/// issued; the all-granted fast path skips it. `after_request` observes
/// every resolved cycle.
#[async_trait]
pub trait PermissionInterceptor: Send + Sync {
    /// Evaluate the request before the rationale gate and platform call.
    async fn before_request(&self, spec: &RequestSpec) -> InterceptDecision;

    /// Observe the final result set before the callback is dispatched.
    async fn after_request(&self, _spec: &RequestSpec, _result: &PermissionResultSet) {}
}
