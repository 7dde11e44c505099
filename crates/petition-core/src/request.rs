//! The data half of one permission request.

use petition_config::PromptDefaults;
use petition_protocol::{Permission, RationalePrompt, SettingsPrompt};

/// Accumulated request configuration, minus the callback.
///
/// Owned by exactly one in-flight request and discarded when that request
/// resolves. Permission insertion order is preserved and duplicates are
/// unioned away, so group helpers stay idempotent.
#[derive(Debug, Clone, Default)]
pub struct RequestSpec {
    /// Deduplicated permissions, in insertion order.
    pub permissions: Vec<Permission>,
    /// Rationale text. Rationale is only ever shown when this is set.
    pub rationale: Option<String>,
    /// Rationale dialog title override.
    pub rationale_title: Option<String>,
    /// Settings prompt text shown after a permanent denial.
    pub settings_text: Option<String>,
    /// Settings dialog title override.
    pub settings_title: Option<String>,
    /// Confirm label override for the rationale dialog.
    pub confirm_label: Option<String>,
    /// Cancel label override for both dialogs.
    pub cancel_label: Option<String>,
    /// Show the settings prompt after a permanent denial even without
    /// settings text.
    pub force_go_to_settings: bool,
}

impl RequestSpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one permission, ignoring duplicates.
    pub fn add_permission(&mut self, permission: impl Into<Permission>) {
        let permission = permission.into();
        if !self.permissions.iter().any(|p| *p == permission) {
            self.permissions.push(permission);
        }
    }

    /// Union a batch of permissions into the spec.
    pub fn add_permissions<I, P>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        for permission in permissions {
            self.add_permission(permission);
        }
    }

    /// Resolve the rationale dialog content against config defaults.
    pub(crate) fn rationale_prompt(
        &self,
        defaults: &PromptDefaults,
        pending: &[Permission],
    ) -> RationalePrompt {
        RationalePrompt {
            title: self
                .rationale_title
                .clone()
                .unwrap_or_else(|| defaults.rationale_title.clone()),
            message: self
                .rationale
                .clone()
                .unwrap_or_else(|| defaults.rationale_message.clone()),
            confirm_label: self
                .confirm_label
                .clone()
                .unwrap_or_else(|| defaults.confirm_label.clone()),
            cancel_label: self
                .cancel_label
                .clone()
                .unwrap_or_else(|| defaults.cancel_label.clone()),
            permissions: pending.to_vec(),
        }
    }

    /// Resolve the settings dialog content against config defaults.
    pub(crate) fn settings_prompt(
        &self,
        defaults: &PromptDefaults,
        permanently_denied: &[Permission],
    ) -> SettingsPrompt {
        SettingsPrompt {
            title: self
                .settings_title
                .clone()
                .unwrap_or_else(|| defaults.settings_title.clone()),
            message: self
                .settings_text
                .clone()
                .unwrap_or_else(|| defaults.settings_message.clone()),
            open_label: defaults.open_settings_label.clone(),
            cancel_label: self
                .cancel_label
                .clone()
                .unwrap_or_else(|| defaults.cancel_label.clone()),
            permissions: permanently_denied.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_permission_unions_duplicates() {
        let mut spec = RequestSpec::new();
        spec.add_permission("camera");
        spec.add_permission("microphone");
        spec.add_permission("camera");
        spec.add_permissions(["microphone", "location"]);

        assert_eq!(
            spec.permissions,
            vec![
                "camera".to_string(),
                "microphone".to_string(),
                "location".to_string(),
            ]
        );
    }

    #[test]
    fn rationale_prompt_prefers_overrides() {
        let defaults = PromptDefaults::default();
        let mut spec = RequestSpec::new();
        spec.rationale = Some("We need the camera for scanning".to_string());
        spec.rationale_title = Some("Camera access".to_string());

        let prompt = spec.rationale_prompt(&defaults, &["camera".to_string()]);
        assert_eq!(prompt.title, "Camera access");
        assert_eq!(prompt.message, "We need the camera for scanning");
        assert_eq!(prompt.confirm_label, defaults.confirm_label);
    }

    #[test]
    fn settings_prompt_falls_back_to_defaults() {
        let defaults = PromptDefaults::default();
        let spec = RequestSpec::new();

        let prompt = spec.settings_prompt(&defaults, &["location".to_string()]);
        assert_eq!(prompt.title, defaults.settings_title);
        assert_eq!(prompt.message, defaults.settings_message);
        assert_eq!(prompt.permissions, vec!["location".to_string()]);
    }
}
