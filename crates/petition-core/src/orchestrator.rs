//! Request orchestrator state machine.
//!
//! Drives one request cycle: check current grants, optionally show
//! rationale, issue the platform request, classify the raw response, and
//! dispatch exactly one terminal callback. A denied result is never
//! re-requested within one cycle.

use crate::callback::{self, PermissionCallback};
use crate::error::PetitionError;
use crate::host::HostAdapter;
use crate::interceptor::{InterceptDecision, PermissionInterceptor};
use crate::presenter::{RationalePresenter, SettingsPresenter};
use crate::ratelimit::RateLimiter;
use crate::request::RequestSpec;
use chrono::Utc;
use log::{debug, info, warn};
use petition_config::PetitionConfig;
use petition_protocol::{
    EventSink, Permission, PermissionEventMsg, PermissionEventPayload, PermissionResultSet,
    PermissionState, RationaleDecision, RequestId, SettingsDecision,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Orchestrates request cycles against one host adapter.
///
/// A single orchestrator accepts one request at a time; overlapping
/// `execute` calls fail fast with [`PetitionError::RequestInFlight`].
/// Independent orchestrators may overlap; a host that refuses the second
/// platform dialog surfaces that as a `HostError`, which classifies the
/// pending permissions as denied rather than deadlocking.
pub struct RequestOrchestrator {
    pub(crate) host: Arc<dyn HostAdapter>,
    pub(crate) rationale_presenter: Option<Arc<dyn RationalePresenter>>,
    pub(crate) settings_presenter: Option<Arc<dyn SettingsPresenter>>,
    pub(crate) interceptors: Vec<Arc<dyn PermissionInterceptor>>,
    pub(crate) event_sink: Option<Arc<dyn EventSink>>,
    pub(crate) rate_limiter: Option<Arc<RateLimiter>>,
    pub(crate) config: PetitionConfig,
    pub(crate) in_flight: AtomicBool,
}

impl RequestOrchestrator {
    /// Create an orchestrator with no presenters, interceptors, or limits.
    pub fn new(host: Arc<dyn HostAdapter>) -> Self {
        Self {
            host,
            rationale_presenter: None,
            settings_presenter: None,
            interceptors: Vec::new(),
            event_sink: None,
            rate_limiter: None,
            config: PetitionConfig::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Attach the rationale presenter.
    pub fn set_rationale_presenter(&mut self, presenter: Arc<dyn RationalePresenter>) {
        self.rationale_presenter = Some(presenter);
    }

    /// Attach the settings presenter.
    pub fn set_settings_presenter(&mut self, presenter: Arc<dyn SettingsPresenter>) {
        self.settings_presenter = Some(presenter);
    }

    /// Add an interceptor evaluated before the platform request.
    pub fn add_interceptor(&mut self, interceptor: Arc<dyn PermissionInterceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Attach an event sink for request cycle events.
    pub fn set_event_sink(&mut self, sink: Arc<dyn EventSink>) {
        self.event_sink = Some(sink);
    }

    /// Attach a shared rate limiter.
    pub fn set_rate_limiter(&mut self, limiter: Arc<RateLimiter>) {
        self.rate_limiter = Some(limiter);
    }

    /// Replace the config.
    pub fn set_config(&mut self, config: PetitionConfig) {
        self.config = config;
    }

    /// Run one request cycle to completion.
    ///
    /// Returns the final result set in addition to dispatching the
    /// configured callback. Synchronous errors are returned before any
    /// host interaction and before any callback fires.
    pub async fn execute(
        &self,
        spec: RequestSpec,
        callback: Option<PermissionCallback>,
    ) -> Result<PermissionResultSet, PetitionError> {
        let _guard =
            InFlightGuard::acquire(&self.in_flight).ok_or(PetitionError::RequestInFlight)?;

        if spec.permissions.is_empty() {
            return Err(PetitionError::EmptyPermissionSet);
        }

        if let Some(limiter) = &self.rate_limiter {
            let blocked: Vec<&Permission> = spec
                .permissions
                .iter()
                .filter(|p| !limiter.check(p))
                .collect();
            if !blocked.is_empty() {
                let blocked = blocked
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(PetitionError::RateLimited(blocked));
            }
            for permission in &spec.permissions {
                limiter.record(permission);
            }
        }

        let request_id = Uuid::new_v4();
        debug!(
            "permission request started (request_id={}, permissions={:?})",
            request_id, spec.permissions
        );
        self.emit(
            request_id,
            PermissionEventPayload::RequestStarted {
                permissions: spec.permissions.clone(),
            },
        );

        let mut callback = callback;

        // CHECKING: split the set into already-granted and pending.
        let pending: Vec<Permission> = spec
            .permissions
            .iter()
            .filter(|p| !self.host.check_permission(p))
            .cloned()
            .collect();

        // Fast path: nothing to ask for, no rationale, no before-request hook.
        if pending.is_empty() {
            debug!("all permissions already granted (request_id={request_id})");
            let result = assemble(&spec, &pending, |_| PermissionState::Granted);
            return self.resolve(request_id, &spec, result, callback).await;
        }

        let mut bypass_rationale = false;
        for interceptor in &self.interceptors {
            match interceptor.before_request(&spec).await {
                InterceptDecision::Continue => {}
                InterceptDecision::Bypass => bypass_rationale = true,
                InterceptDecision::Block => {
                    info!("permission request blocked by interceptor (request_id={request_id})");
                    let result = assemble(&spec, &pending, |_| PermissionState::Denied);
                    return self.resolve(request_id, &spec, result, callback).await;
                }
            }
        }

        // RATIONALE_SHOWN: only with configured text, an attached presenter,
        // and a host that prefers it for at least one pending permission.
        if !bypass_rationale && spec.rationale.is_some() {
            if let Some(presenter) = &self.rationale_presenter {
                if pending.iter().any(|p| self.host.should_show_rationale(p)) {
                    let prompt = spec.rationale_prompt(&self.config.prompts, &pending);
                    self.emit(
                        request_id,
                        PermissionEventPayload::RationaleShown {
                            prompt: prompt.clone(),
                        },
                    );
                    let decision = presenter.show_rationale(&prompt).await;
                    self.emit(
                        request_id,
                        PermissionEventPayload::RationaleAnswered { decision },
                    );
                    if decision == RationaleDecision::Cancel {
                        // The user chose not to be asked; the platform is
                        // never consulted.
                        info!("rationale declined, denying pending (request_id={request_id})");
                        let result = assemble(&spec, &pending, |_| PermissionState::Denied);
                        return self.resolve(request_id, &spec, result, callback).await;
                    }
                }
            }
        }

        // REQUESTING: the before-request hook sees only the permissions
        // actually sent to the platform.
        callback::fire_before_request(&mut callback, &pending);
        self.emit(
            request_id,
            PermissionEventPayload::PlatformRequestIssued {
                permissions: pending.clone(),
            },
        );

        let result = match self.host.request_permissions(&pending).await {
            Ok(grants) => {
                // CLASSIFYING: combine the grant bit with a post-request
                // rationale probe. Missing entries count as denied.
                assemble(&spec, &pending, |permission| {
                    if grants.get(permission).copied().unwrap_or(false) {
                        PermissionState::Granted
                    } else if self.host.should_show_rationale(permission) {
                        PermissionState::Denied
                    } else {
                        PermissionState::PermanentlyDenied
                    }
                })
            }
            Err(err) => {
                // Fail-safe: never hang, never drop the callback.
                warn!("platform request failed, denying pending (request_id={request_id}): {err}");
                assemble(&spec, &pending, |_| PermissionState::Denied)
            }
        };

        self.resolve(request_id, &spec, result, callback).await
    }

    /// DISPATCHED: observer hooks, terminal callback, settings flow.
    async fn resolve(
        &self,
        request_id: RequestId,
        spec: &RequestSpec,
        result: PermissionResultSet,
        callback: Option<PermissionCallback>,
    ) -> Result<PermissionResultSet, PetitionError> {
        for interceptor in &self.interceptors {
            interceptor.after_request(spec, &result).await;
        }

        // The terminal callback fires before the settings flow so it cannot
        // be held up by the user ignoring the settings prompt.
        callback::dispatch(callback, &result);
        debug!(
            "permission request resolved (request_id={}, granted={}, denied={}, permanent={})",
            request_id,
            result.granted.len(),
            result.denied.len(),
            result.permanently_denied.len()
        );
        self.emit(
            request_id,
            PermissionEventPayload::RequestResolved {
                result: result.clone(),
            },
        );

        let wants_settings = spec.settings_text.is_some()
            || spec.force_go_to_settings
            || self.config.force_go_to_settings;
        if !result.permanently_denied.is_empty() && wants_settings {
            if let Some(presenter) = &self.settings_presenter {
                let prompt = spec.settings_prompt(&self.config.prompts, &result.permanently_denied);
                self.emit(
                    request_id,
                    PermissionEventPayload::SettingsPromptShown {
                        prompt: prompt.clone(),
                    },
                );
                if presenter.show_settings_prompt(&prompt).await == SettingsDecision::OpenSettings {
                    self.host.open_app_settings();
                }
            }
        }

        Ok(result)
    }

    fn emit(&self, request_id: RequestId, payload: PermissionEventPayload) {
        let Some(sink) = &self.event_sink else {
            return;
        };
        sink.emit(PermissionEventMsg {
            id: Uuid::new_v4(),
            request_id,
            created_at: Utc::now(),
            payload,
        });
    }
}

/// Classify every requested permission in request order.
///
/// Permissions outside `pending` were granted before the platform request
/// and stay granted without a second probe.
fn assemble<F>(spec: &RequestSpec, pending: &[Permission], mut classify: F) -> PermissionResultSet
where
    F: FnMut(&str) -> PermissionState,
{
    let mut result = PermissionResultSet::new();
    for permission in &spec.permissions {
        let state = if pending.iter().any(|p| p == permission) {
            classify(permission)
        } else {
            PermissionState::Granted
        };
        result.record(permission.clone(), state);
    }
    result
}

/// RAII release of the in-flight flag on every exit path.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
