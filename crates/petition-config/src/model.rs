//! Configuration schema for the petition request pipeline.

use serde::{Deserialize, Serialize};

/// Root config for petition.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PetitionConfig {
    /// Default dialog texts used when the builder does not override them.
    #[serde(default)]
    pub prompts: PromptDefaults,
    /// Per-permission request throttling.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Show the settings prompt after a permanent denial even when no
    /// settings text was configured.
    #[serde(default)]
    pub force_go_to_settings: bool,
}

impl PetitionConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> PetitionConfigBuilder {
        PetitionConfigBuilder::new()
    }
}

/// Builder for assembling a `PetitionConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct PetitionConfigBuilder {
    config: PetitionConfig,
}

impl PetitionConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: PetitionConfig::default(),
        }
    }

    /// Replace the default prompt texts.
    pub fn prompts(mut self, prompts: PromptDefaults) -> Self {
        self.config.prompts = prompts;
        self
    }

    /// Replace the rate limit configuration.
    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.config.rate_limit = rate_limit;
        self
    }

    /// Always show the settings prompt after a permanent denial.
    pub fn force_go_to_settings(mut self, force: bool) -> Self {
        self.config.force_go_to_settings = force;
        self
    }

    /// Finalize and return the built `PetitionConfig`.
    pub fn build(self) -> PetitionConfig {
        self.config
    }
}

/// Default dialog texts for rationale and settings prompts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptDefaults {
    /// Title of the rationale dialog.
    #[serde(default = "default_rationale_title")]
    pub rationale_title: String,
    /// Fallback rationale message.
    #[serde(default = "default_rationale_message")]
    pub rationale_message: String,
    /// Label of the proceed action.
    #[serde(default = "default_confirm_label")]
    pub confirm_label: String,
    /// Label of the cancel action.
    #[serde(default = "default_cancel_label")]
    pub cancel_label: String,
    /// Title of the settings dialog.
    #[serde(default = "default_settings_title")]
    pub settings_title: String,
    /// Fallback settings message.
    #[serde(default = "default_settings_message")]
    pub settings_message: String,
    /// Label of the open-settings action.
    #[serde(default = "default_open_settings_label")]
    pub open_settings_label: String,
}

impl Default for PromptDefaults {
    fn default() -> Self {
        Self {
            rationale_title: default_rationale_title(),
            rationale_message: default_rationale_message(),
            confirm_label: default_confirm_label(),
            cancel_label: default_cancel_label(),
            settings_title: default_settings_title(),
            settings_message: default_settings_message(),
            open_settings_label: default_open_settings_label(),
        }
    }
}

fn default_rationale_title() -> String {
    "Permission needed".to_string()
}

fn default_rationale_message() -> String {
    "The app needs these permissions to work properly".to_string()
}

fn default_confirm_label() -> String {
    "Continue".to_string()
}

fn default_cancel_label() -> String {
    "Cancel".to_string()
}

fn default_settings_title() -> String {
    "Permission settings".to_string()
}

fn default_settings_message() -> String {
    "Permissions were permanently denied; enable them in settings".to_string()
}

fn default_open_settings_label() -> String {
    "Open settings".to_string()
}

/// Per-permission request throttling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Whether throttling is applied at all.
    #[serde(default)]
    pub enabled: bool,
    /// Minimum milliseconds between two requests for one permission.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    /// Maximum requests for one permission inside the sliding window.
    #[serde(default = "default_max_requests_per_window")]
    pub max_requests_per_window: usize,
    /// Sliding window length in milliseconds.
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_interval_ms: default_min_interval_ms(),
            max_requests_per_window: default_max_requests_per_window(),
            window_ms: default_window_ms(),
        }
    }
}

fn default_min_interval_ms() -> u64 {
    5_000
}

fn default_max_requests_per_window() -> usize {
    10
}

fn default_window_ms() -> u64 {
    3_600_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_deserializes_with_defaults() {
        let config: PetitionConfig = serde_json::from_str("{}").expect("config");
        assert_eq!(config, PetitionConfig::default());
        assert_eq!(config.rate_limit.enabled, false);
        assert_eq!(config.rate_limit.min_interval_ms, 5_000);
        assert_eq!(config.prompts.rationale_title, "Permission needed");
    }

    #[test]
    fn builder_overrides_selected_sections() {
        let config = PetitionConfig::builder()
            .rate_limit(RateLimitConfig {
                enabled: true,
                min_interval_ms: 100,
                max_requests_per_window: 2,
                window_ms: 1_000,
            })
            .force_go_to_settings(true)
            .build();

        assert_eq!(config.rate_limit.enabled, true);
        assert_eq!(config.rate_limit.max_requests_per_window, 2);
        assert_eq!(config.force_go_to_settings, true);
        assert_eq!(config.prompts, PromptDefaults::default());
    }
}
