use async_trait::async_trait;
use parking_lot::Mutex;
use petition_core::{RationalePresenter, SettingsPresenter};
use petition_protocol::{RationaleDecision, RationalePrompt, SettingsDecision, SettingsPrompt};

/// Rationale presenter that always answers with a fixed decision and
/// records every prompt it was shown.
pub struct StaticRationalePresenter {
    decision: RationaleDecision,
    shown: Mutex<Vec<RationalePrompt>>,
}

impl StaticRationalePresenter {
    pub fn new(decision: RationaleDecision) -> Self {
        Self {
            decision,
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order.
    pub fn shown(&self) -> Vec<RationalePrompt> {
        self.shown.lock().clone()
    }

    pub fn shown_count(&self) -> usize {
        self.shown.lock().len()
    }
}

#[async_trait]
impl RationalePresenter for StaticRationalePresenter {
    async fn show_rationale(&self, prompt: &RationalePrompt) -> RationaleDecision {
        self.shown.lock().push(prompt.clone());
        self.decision
    }
}

/// Settings presenter that always answers with a fixed decision and
/// records every prompt it was shown.
pub struct StaticSettingsPresenter {
    decision: SettingsDecision,
    shown: Mutex<Vec<SettingsPrompt>>,
}

impl StaticSettingsPresenter {
    pub fn new(decision: SettingsDecision) -> Self {
        Self {
            decision,
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order.
    pub fn shown(&self) -> Vec<SettingsPrompt> {
        self.shown.lock().clone()
    }

    pub fn shown_count(&self) -> usize {
        self.shown.lock().len()
    }
}

#[async_trait]
impl SettingsPresenter for StaticSettingsPresenter {
    async fn show_settings_prompt(&self, prompt: &SettingsPrompt) -> SettingsDecision {
        self.shown.lock().push(prompt.clone());
        self.decision
    }
}
