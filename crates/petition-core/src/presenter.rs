//! Presenter seams for rationale and settings dialogs.

use async_trait::async_trait;
use petition_protocol::{RationaleDecision, RationalePrompt, SettingsDecision, SettingsPrompt};

/// Confirmation UI shown before the platform request when the host prefers
/// a rationale and rationale text was configured.
#[async_trait]
pub trait RationalePresenter: Send + Sync {
    /// Show the rationale and resolve with the user's choice.
    async fn show_rationale(&self, prompt: &RationalePrompt) -> RationaleDecision;
}

/// Informational UI steering the user to system settings after a permanent
/// denial. Never blocks the terminal callback.
#[async_trait]
pub trait SettingsPresenter: Send + Sync {
    /// Show the settings prompt and resolve with the user's choice.
    async fn show_settings_prompt(&self, prompt: &SettingsPrompt) -> SettingsDecision;
}
