use async_trait::async_trait;
use parking_lot::Mutex;
use petition_core::HostAdapter;
use petition_protocol::{HostError, Permission};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted host adapter for driving the orchestrator in tests.
///
/// Configure the pre-request world with `with_granted` / `with_rationale`,
/// script the platform answer with `with_response`, and optionally flip the
/// post-request rationale flag with `with_rationale_after` to model the
/// "don't ask again" transition. Every call is recorded.
pub struct ScriptedHost {
    granted: Mutex<HashSet<Permission>>,
    rationale: Mutex<HashSet<Permission>>,
    responses: HashMap<Permission, bool>,
    rationale_after: HashMap<Permission, bool>,
    failure: Option<HostError>,
    delay: Option<Duration>,
    requests: Mutex<Vec<Vec<Permission>>>,
    settings_opened: AtomicUsize,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            granted: Mutex::new(HashSet::new()),
            rationale: Mutex::new(HashSet::new()),
            responses: HashMap::new(),
            rationale_after: HashMap::new(),
            failure: None,
            delay: None,
            requests: Mutex::new(Vec::new()),
            settings_opened: AtomicUsize::new(0),
        }
    }

    /// Mark a permission as already granted before the request.
    pub fn with_granted(self, permission: impl Into<Permission>) -> Self {
        self.granted.lock().insert(permission.into());
        self
    }

    /// Make `should_show_rationale` report true for a permission.
    pub fn with_rationale(self, permission: impl Into<Permission>) -> Self {
        self.rationale.lock().insert(permission.into());
        self
    }

    /// Script the platform's grant answer for a permission.
    pub fn with_response(mut self, permission: impl Into<Permission>, granted: bool) -> Self {
        self.responses.insert(permission.into(), granted);
        self
    }

    /// Script the post-request `should_show_rationale` answer.
    pub fn with_rationale_after(mut self, permission: impl Into<Permission>, show: bool) -> Self {
        self.rationale_after.insert(permission.into(), show);
        self
    }

    /// Make `request_permissions` fail with the given error.
    pub fn with_failure(mut self, error: HostError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Delay `request_permissions` to simulate a user taking their time.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Permission batches passed to `request_permissions`, in call order.
    pub fn requests(&self) -> Vec<Vec<Permission>> {
        self.requests.lock().clone()
    }

    /// Number of platform requests issued.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Number of times the settings screen was opened.
    pub fn settings_opened(&self) -> usize {
        self.settings_opened.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostAdapter for ScriptedHost {
    fn check_permission(&self, permission: &str) -> bool {
        self.granted.lock().contains(permission)
    }

    fn should_show_rationale(&self, permission: &str) -> bool {
        self.rationale.lock().contains(permission)
    }

    async fn request_permissions(
        &self,
        permissions: &[Permission],
    ) -> Result<HashMap<Permission, bool>, HostError> {
        self.requests.lock().push(permissions.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let mut grants = HashMap::new();
        for permission in permissions {
            let granted = self.responses.get(permission).copied().unwrap_or(false);
            grants.insert(permission.clone(), granted);
            if granted {
                self.granted.lock().insert(permission.clone());
            }
        }
        // Apply the scripted post-request rationale state.
        for (permission, show) in &self.rationale_after {
            if *show {
                self.rationale.lock().insert(permission.clone());
            } else {
                self.rationale.lock().remove(permission);
            }
        }
        Ok(grants)
    }

    fn open_app_settings(&self) {
        self.settings_opened.fetch_add(1, Ordering::SeqCst);
    }
}
