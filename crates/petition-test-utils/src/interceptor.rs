use async_trait::async_trait;
use parking_lot::Mutex;
use petition_core::{InterceptDecision, PermissionInterceptor, RequestSpec};
use petition_protocol::PermissionResultSet;

/// Interceptor that always answers with a fixed decision and records the
/// result sets it observed.
pub struct StaticInterceptor {
    decision: InterceptDecision,
    observed: Mutex<Vec<PermissionResultSet>>,
}

impl StaticInterceptor {
    pub fn new(decision: InterceptDecision) -> Self {
        Self {
            decision,
            observed: Mutex::new(Vec::new()),
        }
    }

    /// Result sets seen by `after_request`, in order.
    pub fn observed(&self) -> Vec<PermissionResultSet> {
        self.observed.lock().clone()
    }
}

#[async_trait]
impl PermissionInterceptor for StaticInterceptor {
    async fn before_request(&self, _spec: &RequestSpec) -> InterceptDecision {
        self.decision
    }

    async fn after_request(&self, _spec: &RequestSpec, result: &PermissionResultSet) {
        self.observed.lock().push(result.clone());
    }
}
