//! Shared types for petition permission requests, results, and events.

mod host;

pub use host::HostError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A platform permission identifier. Opaque to this library.
pub type Permission = String;
/// Unique identifier for one permission request cycle.
pub type RequestId = Uuid;

/// Classification of a single permission after a request cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// The permission is granted.
    Granted,
    /// The permission is denied but the platform would still prompt.
    Denied,
    /// The permission is denied and the platform will no longer prompt;
    /// recovery requires the user to visit system settings.
    PermanentlyDenied,
}

/// Partitioned outcome of one permission request cycle.
///
/// The three lists are pairwise disjoint and their union equals the
/// requested permission set, in request order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionResultSet {
    /// Permissions that ended up granted.
    pub granted: Vec<Permission>,
    /// Permissions denied but still promptable.
    pub denied: Vec<Permission>,
    /// Permissions the platform will no longer prompt for.
    pub permanently_denied: Vec<Permission>,
}

impl PermissionResultSet {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one permission under its classified state, preserving order.
    pub fn record(&mut self, permission: Permission, state: PermissionState) {
        match state {
            PermissionState::Granted => self.granted.push(permission),
            PermissionState::Denied => self.denied.push(permission),
            PermissionState::PermanentlyDenied => self.permanently_denied.push(permission),
        }
    }

    /// Whether every requested permission was granted.
    pub fn all_granted(&self) -> bool {
        self.denied.is_empty() && self.permanently_denied.is_empty()
    }

    /// Total number of classified permissions.
    pub fn len(&self) -> usize {
        self.granted.len() + self.denied.len() + self.permanently_denied.len()
    }

    /// Whether no permission was classified at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Denied permissions with the permanently denied ones folded in.
    ///
    /// This is the flattened list handed to the simple callback shape.
    pub fn denied_including_permanent(&self) -> Vec<Permission> {
        let mut all = self.denied.clone();
        all.extend(self.permanently_denied.iter().cloned());
        all
    }

    /// Look up the classified state of a single permission.
    pub fn state_of(&self, permission: &str) -> Option<PermissionState> {
        if self.granted.iter().any(|p| p == permission) {
            return Some(PermissionState::Granted);
        }
        if self.denied.iter().any(|p| p == permission) {
            return Some(PermissionState::Denied);
        }
        if self.permanently_denied.iter().any(|p| p == permission) {
            return Some(PermissionState::PermanentlyDenied);
        }
        None
    }
}

/// Resolved rationale dialog content shown before requesting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RationalePrompt {
    /// Dialog title.
    pub title: String,
    /// Explanation of why the permissions are needed.
    pub message: String,
    /// Label of the proceed action.
    pub confirm_label: String,
    /// Label of the cancel action.
    pub cancel_label: String,
    /// Permissions the rationale covers.
    pub permissions: Vec<Permission>,
}

/// User answer to a rationale prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RationaleDecision {
    /// Continue with the platform request.
    Proceed,
    /// Abort; the user chose not to be asked.
    Cancel,
}

/// Resolved settings dialog content shown after permanent denial.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsPrompt {
    /// Dialog title.
    pub title: String,
    /// Explanation steering the user towards system settings.
    pub message: String,
    /// Label of the open-settings action.
    pub open_label: String,
    /// Label of the dismiss action.
    pub cancel_label: String,
    /// Permissions that are permanently denied.
    pub permissions: Vec<Permission>,
}

/// User answer to a settings prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettingsDecision {
    /// Navigate to the platform settings screen.
    OpenSettings,
    /// Dismiss without navigating.
    Dismiss,
}

/// Wrapper for events emitted during one request cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionEventMsg {
    /// Unique id for the event.
    pub id: Uuid,
    /// Request cycle the event belongs to.
    pub request_id: RequestId,
    /// Timestamp when the event was created.
    pub created_at: DateTime<Utc>,
    /// Event payload content.
    pub payload: PermissionEventPayload,
}

/// All events emitted while a request cycle runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "payload")]
pub enum PermissionEventPayload {
    /// A request cycle started with the given permission set.
    RequestStarted { permissions: Vec<Permission> },
    /// The rationale prompt was shown to the user.
    RationaleShown { prompt: RationalePrompt },
    /// The user answered the rationale prompt.
    RationaleAnswered { decision: RationaleDecision },
    /// The platform request was issued for the pending permissions.
    PlatformRequestIssued { permissions: Vec<Permission> },
    /// The settings prompt was shown to the user.
    SettingsPromptShown { prompt: SettingsPrompt },
    /// The request cycle resolved with a final result set.
    RequestResolved { result: PermissionResultSet },
}

/// Sink interface for request cycle events.
pub trait EventSink: Send + Sync {
    /// Emit an event to downstream listeners.
    fn emit(&self, event: PermissionEventMsg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_partitions_by_state() {
        let mut result = PermissionResultSet::new();
        result.record("camera".to_string(), PermissionState::Granted);
        result.record("microphone".to_string(), PermissionState::Denied);
        result.record("location".to_string(), PermissionState::PermanentlyDenied);

        assert_eq!(result.granted, vec!["camera".to_string()]);
        assert_eq!(result.denied, vec!["microphone".to_string()]);
        assert_eq!(result.permanently_denied, vec!["location".to_string()]);
        assert_eq!(result.len(), 3);
        assert_eq!(result.all_granted(), false);
    }

    #[test]
    fn denied_including_permanent_folds_both_lists() {
        let mut result = PermissionResultSet::new();
        result.record("camera".to_string(), PermissionState::Denied);
        result.record("location".to_string(), PermissionState::PermanentlyDenied);

        assert_eq!(
            result.denied_including_permanent(),
            vec!["camera".to_string(), "location".to_string()]
        );
    }

    #[test]
    fn state_of_finds_each_partition() {
        let mut result = PermissionResultSet::new();
        result.record("a".to_string(), PermissionState::Granted);
        result.record("b".to_string(), PermissionState::Denied);
        result.record("c".to_string(), PermissionState::PermanentlyDenied);

        assert_eq!(result.state_of("a"), Some(PermissionState::Granted));
        assert_eq!(result.state_of("b"), Some(PermissionState::Denied));
        assert_eq!(result.state_of("c"), Some(PermissionState::PermanentlyDenied));
        assert_eq!(result.state_of("d"), None);
    }

    #[test]
    fn empty_result_is_all_granted() {
        // Vacuously true for the fast path with zero pending denials.
        let result = PermissionResultSet::new();
        assert_eq!(result.all_granted(), true);
        assert_eq!(result.is_empty(), true);
    }

    #[test]
    fn event_payload_serializes_with_type_tag() {
        let payload = PermissionEventPayload::RequestStarted {
            permissions: vec!["camera".to_string()],
        };
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["type"], "request_started");
        assert_eq!(value["payload"]["permissions"][0], "camera");
    }
}
