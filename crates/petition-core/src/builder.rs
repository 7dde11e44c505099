//! Fluent entry point for assembling and issuing a permission request.

use crate::callback::{DetailedHooks, PermissionCallback};
use crate::error::PetitionError;
use crate::groups;
use crate::host::HostAdapter;
use crate::interceptor::PermissionInterceptor;
use crate::orchestrator::RequestOrchestrator;
use crate::presenter::{RationalePresenter, SettingsPresenter};
use crate::ratelimit::RateLimiter;
use crate::request::RequestSpec;
use petition_config::PetitionConfig;
use petition_protocol::{EventSink, Permission, PermissionResultSet};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Fluent builder for one permission request.
///
/// Setters accumulate configuration without performing any I/O or
/// validation; everything is deferred to [`request`](Self::request), which
/// consumes the builder. The single-use lifecycle is enforced by ownership:
/// once `request()` is called the builder is spent.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use petition_core::{HostAdapter, PermissionRequestBuilder};
/// # async fn demo(host: Arc<dyn HostAdapter>) {
/// let result = PermissionRequestBuilder::with(host)
///     .permission("android.permission.CAMERA")
///     .rationale("The camera is used to scan documents")
///     .on_result(|all_granted, _granted, _denied| {
///         if all_granted {
///             // open the camera
///         }
///     })
///     .request()
///     .await;
/// # let _ = result;
/// # }
/// ```
pub struct PermissionRequestBuilder {
    host: Arc<dyn HostAdapter>,
    spec: RequestSpec,
    callback: Option<PermissionCallback>,
    rationale_presenter: Option<Arc<dyn RationalePresenter>>,
    settings_presenter: Option<Arc<dyn SettingsPresenter>>,
    interceptors: Vec<Arc<dyn PermissionInterceptor>>,
    event_sink: Option<Arc<dyn EventSink>>,
    rate_limiter: Option<Arc<RateLimiter>>,
    config: PetitionConfig,
}

impl PermissionRequestBuilder {
    /// Start a request against the given host adapter.
    pub fn with(host: Arc<dyn HostAdapter>) -> Self {
        Self {
            host,
            spec: RequestSpec::new(),
            callback: None,
            rationale_presenter: None,
            settings_presenter: None,
            interceptors: Vec::new(),
            event_sink: None,
            rate_limiter: None,
            config: PetitionConfig::default(),
        }
    }

    /// Add a single permission.
    pub fn permission(mut self, permission: impl Into<Permission>) -> Self {
        self.spec.add_permission(permission);
        self
    }

    /// Add a batch of permissions.
    pub fn permissions<I, P>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.spec.add_permissions(permissions);
        self
    }

    /// Union a named permission group into the request.
    pub fn permission_group(mut self, group: &[&str]) -> Self {
        self.spec.add_permissions(group.iter().copied());
        self
    }

    /// Add the foreground location group.
    pub fn location_permissions(self) -> Self {
        self.permission_group(groups::LOCATION_PERMISSIONS)
    }

    /// Add the legacy storage group.
    pub fn storage_permissions(self) -> Self {
        self.permission_group(groups::STORAGE_PERMISSIONS)
    }

    /// Add the scoped media group.
    pub fn media_permissions(self) -> Self {
        self.permission_group(groups::MEDIA_PERMISSIONS)
    }

    /// Add the camera plus microphone group.
    pub fn camera_and_audio_permissions(self) -> Self {
        self.permission_group(groups::CAMERA_AND_AUDIO_PERMISSIONS)
    }

    /// Add the contacts group.
    pub fn contacts_permissions(self) -> Self {
        self.permission_group(groups::CONTACTS_PERMISSIONS)
    }

    /// Add the notification permission.
    pub fn notification_permission(self) -> Self {
        self.permission_group(groups::NOTIFICATION_PERMISSIONS)
    }

    /// Set the rationale text shown before requesting.
    pub fn rationale(mut self, text: impl Into<String>) -> Self {
        self.spec.rationale = Some(text.into());
        self
    }

    /// Set the rationale dialog title.
    pub fn rationale_title(mut self, title: impl Into<String>) -> Self {
        self.spec.rationale_title = Some(title.into());
        self
    }

    /// Set the settings prompt text shown after a permanent denial.
    pub fn settings_text(mut self, text: impl Into<String>) -> Self {
        self.spec.settings_text = Some(text.into());
        self
    }

    /// Set the settings dialog title.
    pub fn settings_title(mut self, title: impl Into<String>) -> Self {
        self.spec.settings_title = Some(title.into());
        self
    }

    /// Override the confirm label of the rationale dialog.
    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.spec.confirm_label = Some(label.into());
        self
    }

    /// Override the cancel label of both dialogs.
    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.spec.cancel_label = Some(label.into());
        self
    }

    /// Show the settings prompt after a permanent denial even without
    /// settings text.
    pub fn force_go_to_settings(mut self, force: bool) -> Self {
        self.spec.force_go_to_settings = force;
        self
    }

    /// Use the simple callback shape. Replaces any detailed hooks.
    pub fn on_result<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(bool, Vec<Permission>, Vec<Permission>) + Send + 'static,
    {
        self.callback = Some(PermissionCallback::Simple(Box::new(callback)));
        self
    }

    /// Detailed hook fired with the permissions actually sent to the
    /// platform. Never fires on the all-granted fast path.
    pub fn on_before_request<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&[Permission]) + Send + 'static,
    {
        let mut hooks = self.take_detailed_hooks();
        hooks.before_request = Some(Box::new(callback));
        self.callback = Some(PermissionCallback::Detailed(hooks));
        self
    }

    /// Detailed hook fired with the granted permissions, if any.
    pub fn on_granted<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(Vec<Permission>) + Send + 'static,
    {
        let mut hooks = self.take_detailed_hooks();
        hooks.granted = Some(Box::new(callback));
        self.callback = Some(PermissionCallback::Detailed(hooks));
        self
    }

    /// Detailed hook fired with `(denied, permanently_denied)` when either
    /// list is non-empty.
    pub fn on_denied<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(Vec<Permission>, Vec<Permission>) + Send + 'static,
    {
        let mut hooks = self.take_detailed_hooks();
        hooks.denied = Some(Box::new(callback));
        self.callback = Some(PermissionCallback::Detailed(hooks));
        self
    }

    /// Detailed hook fired with the permanently denied permissions, after
    /// `on_denied`.
    pub fn on_permanently_denied<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(Vec<Permission>) + Send + 'static,
    {
        let mut hooks = self.take_detailed_hooks();
        hooks.permanently_denied = Some(Box::new(callback));
        self.callback = Some(PermissionCallback::Detailed(hooks));
        self
    }

    /// Attach the rationale presenter.
    pub fn rationale_presenter(mut self, presenter: Arc<dyn RationalePresenter>) -> Self {
        self.rationale_presenter = Some(presenter);
        self
    }

    /// Attach the settings presenter.
    pub fn settings_presenter(mut self, presenter: Arc<dyn SettingsPresenter>) -> Self {
        self.settings_presenter = Some(presenter);
        self
    }

    /// Add an interceptor evaluated before the platform request.
    pub fn interceptor(mut self, interceptor: Arc<dyn PermissionInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Attach an event sink for request cycle events.
    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Attach a shared rate limiter.
    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Replace the config.
    pub fn config(mut self, config: PetitionConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder and run the request cycle to completion.
    ///
    /// Dispatches the configured callback exactly once and also returns the
    /// final result set, so callers without a callback can just await.
    /// Fails fast with [`PetitionError::EmptyPermissionSet`] before any
    /// host interaction when no permission was added.
    pub async fn request(self) -> Result<PermissionResultSet, PetitionError> {
        let orchestrator = RequestOrchestrator {
            host: self.host,
            rationale_presenter: self.rationale_presenter,
            settings_presenter: self.settings_presenter,
            interceptors: self.interceptors,
            event_sink: self.event_sink,
            rate_limiter: self.rate_limiter,
            config: self.config,
            in_flight: AtomicBool::new(false),
        };
        orchestrator.execute(self.spec, self.callback).await
    }

    /// Switching shapes drops the previous callback: last write wins.
    fn take_detailed_hooks(&mut self) -> DetailedHooks {
        match self.callback.take() {
            Some(PermissionCallback::Detailed(hooks)) => hooks,
            _ => DetailedHooks::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use petition_protocol::HostError;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    struct DenyAllHost;

    #[async_trait]
    impl HostAdapter for DenyAllHost {
        fn check_permission(&self, _permission: &str) -> bool {
            false
        }

        fn should_show_rationale(&self, _permission: &str) -> bool {
            false
        }

        async fn request_permissions(
            &self,
            permissions: &[Permission],
        ) -> Result<HashMap<Permission, bool>, HostError> {
            Ok(permissions.iter().map(|p| (p.clone(), false)).collect())
        }

        fn open_app_settings(&self) {}
    }

    fn builder() -> PermissionRequestBuilder {
        PermissionRequestBuilder::with(Arc::new(DenyAllHost))
    }

    #[test]
    fn group_helpers_union_without_duplicates() {
        let built = builder()
            .camera_and_audio_permissions()
            .permission("android.permission.CAMERA")
            .camera_and_audio_permissions();

        assert_eq!(
            built.spec.permissions,
            vec![
                "android.permission.CAMERA".to_string(),
                "android.permission.RECORD_AUDIO".to_string(),
            ]
        );
    }

    #[test]
    fn last_callback_write_wins() {
        let built = builder()
            .on_granted(|_| {})
            .on_result(|_, _, _| {});
        assert!(matches!(built.callback, Some(PermissionCallback::Simple(_))));

        let built = builder()
            .on_result(|_, _, _| {})
            .on_denied(|_, _| {});
        assert!(matches!(
            built.callback,
            Some(PermissionCallback::Detailed(_))
        ));
    }

    #[test]
    fn detailed_setters_merge_into_one_shape() {
        let built = builder()
            .on_granted(|_| {})
            .on_denied(|_, _| {})
            .on_permanently_denied(|_| {});
        let Some(PermissionCallback::Detailed(hooks)) = built.callback else {
            panic!("expected detailed callback");
        };
        assert_eq!(hooks.granted.is_some(), true);
        assert_eq!(hooks.denied.is_some(), true);
        assert_eq!(hooks.permanently_denied.is_some(), true);
        assert_eq!(hooks.before_request.is_none(), true);
    }

    #[tokio::test]
    async fn empty_permission_set_fails_fast() {
        let err = builder().request().await.expect_err("must fail");
        assert!(matches!(err, PetitionError::EmptyPermissionSet));
    }
}
