//! Callback shapes and terminal dispatch.

use petition_protocol::{Permission, PermissionResultSet};

/// Simple shape: `(all_granted, granted, denied)`.
pub type SimpleResultFn = Box<dyn FnOnce(bool, Vec<Permission>, Vec<Permission>) + Send>;
/// Fired with the permissions actually sent to the platform.
pub type BeforeRequestFn = Box<dyn FnOnce(&[Permission]) + Send>;
/// Fired with the granted permissions.
pub type GrantedFn = Box<dyn FnOnce(Vec<Permission>) + Send>;
/// Fired with `(denied, permanently_denied)`.
pub type DeniedFn = Box<dyn FnOnce(Vec<Permission>, Vec<Permission>) + Send>;
/// Fired with the permanently denied permissions.
pub type PermanentlyDeniedFn = Box<dyn FnOnce(Vec<Permission>) + Send>;

/// The callback configured for one request. Exactly one shape is active;
/// the builder replaces it wholesale when the caller switches shapes.
pub enum PermissionCallback {
    /// Single boolean-result callback for callers that only care about the
    /// final outcome. Permanently denied permissions are folded into the
    /// denied list.
    Simple(SimpleResultFn),
    /// Four-phase lifecycle callback.
    Detailed(DetailedHooks),
}

/// Hooks of the detailed callback shape. Each hook is invoked at most once
/// and only when its argument set is non-empty.
#[derive(Default)]
pub struct DetailedHooks {
    pub(crate) before_request: Option<BeforeRequestFn>,
    pub(crate) granted: Option<GrantedFn>,
    pub(crate) denied: Option<DeniedFn>,
    pub(crate) permanently_denied: Option<PermanentlyDeniedFn>,
}

/// Fire the before-request hook, if the detailed shape carries one.
///
/// Only called when a platform request is actually about to be issued; the
/// all-granted fast path never reaches this.
pub(crate) fn fire_before_request(
    callback: &mut Option<PermissionCallback>,
    pending: &[Permission],
) {
    if let Some(PermissionCallback::Detailed(hooks)) = callback {
        if let Some(hook) = hooks.before_request.take() {
            hook(pending);
        }
    }
}

/// Render the terminal result into the configured callback shape.
///
/// Detailed hooks fire in the fixed order granted, denied, permanently
/// denied, each skipped when its argument set is empty.
pub(crate) fn dispatch(callback: Option<PermissionCallback>, result: &PermissionResultSet) {
    match callback {
        None => {}
        Some(PermissionCallback::Simple(f)) => {
            f(
                result.all_granted(),
                result.granted.clone(),
                result.denied_including_permanent(),
            );
        }
        Some(PermissionCallback::Detailed(hooks)) => {
            if !result.granted.is_empty() {
                if let Some(hook) = hooks.granted {
                    hook(result.granted.clone());
                }
            }
            if !result.denied.is_empty() || !result.permanently_denied.is_empty() {
                if let Some(hook) = hooks.denied {
                    hook(result.denied.clone(), result.permanently_denied.clone());
                }
            }
            if !result.permanently_denied.is_empty() {
                if let Some(hook) = hooks.permanently_denied {
                    hook(result.permanently_denied.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use petition_protocol::PermissionState;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn result_with(states: &[(&str, PermissionState)]) -> PermissionResultSet {
        let mut result = PermissionResultSet::new();
        for (permission, state) in states {
            result.record(permission.to_string(), *state);
        }
        result
    }

    #[test]
    fn simple_folds_permanent_denials_into_denied() {
        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        let callback = PermissionCallback::Simple(Box::new(move |all, granted, denied| {
            *sink.lock() = Some((all, granted, denied));
        }));

        let result = result_with(&[
            ("camera", PermissionState::Granted),
            ("microphone", PermissionState::Denied),
            ("location", PermissionState::PermanentlyDenied),
        ]);
        dispatch(Some(callback), &result);

        let (all, granted, denied) = observed.lock().take().expect("invoked");
        assert_eq!(all, false);
        assert_eq!(granted, vec!["camera".to_string()]);
        assert_eq!(denied, vec!["microphone".to_string(), "location".to_string()]);
    }

    #[test]
    fn simple_reports_all_granted() {
        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        let callback = PermissionCallback::Simple(Box::new(move |all, granted, denied| {
            *sink.lock() = Some((all, granted, denied));
        }));

        let result = result_with(&[("camera", PermissionState::Granted)]);
        dispatch(Some(callback), &result);

        let (all, granted, denied) = observed.lock().take().expect("invoked");
        assert_eq!(all, true);
        assert_eq!(granted, vec!["camera".to_string()]);
        assert_eq!(denied, Vec::<String>::new());
    }

    #[test]
    fn detailed_skips_hooks_with_empty_arguments() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let granted_calls = calls.clone();
        let denied_calls = calls.clone();
        let permanent_calls = calls.clone();
        let hooks = DetailedHooks {
            before_request: None,
            granted: Some(Box::new(move |_| granted_calls.lock().push("granted"))),
            denied: Some(Box::new(move |_, _| denied_calls.lock().push("denied"))),
            permanently_denied: Some(Box::new(move |_| permanent_calls.lock().push("permanent"))),
        };

        let result = result_with(&[("camera", PermissionState::Granted)]);
        dispatch(Some(PermissionCallback::Detailed(hooks)), &result);

        assert_eq!(*calls.lock(), vec!["granted"]);
    }

    #[test]
    fn detailed_fires_permanently_denied_after_denied() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let denied_calls = calls.clone();
        let permanent_calls = calls.clone();
        let hooks = DetailedHooks {
            before_request: None,
            granted: None,
            denied: Some(Box::new(move |denied, permanent| {
                denied_calls.lock().push(format!("denied:{denied:?}:{permanent:?}"));
            })),
            permanently_denied: Some(Box::new(move |permanent| {
                permanent_calls.lock().push(format!("permanent:{permanent:?}"));
            })),
        };

        let result = result_with(&[
            ("camera", PermissionState::Denied),
            ("microphone", PermissionState::PermanentlyDenied),
        ]);
        dispatch(Some(PermissionCallback::Detailed(hooks)), &result);

        assert_eq!(
            *calls.lock(),
            vec![
                "denied:[\"camera\"]:[\"microphone\"]".to_string(),
                "permanent:[\"microphone\"]".to_string(),
            ]
        );
    }

    #[test]
    fn before_request_only_fires_for_detailed() {
        let fired = Arc::new(Mutex::new(0));
        let count = fired.clone();
        let mut callback = Some(PermissionCallback::Simple(Box::new(move |_, _, _| {
            *count.lock() += 1;
        })));
        fire_before_request(&mut callback, &["camera".to_string()]);
        assert_eq!(*fired.lock(), 0);

        let count = fired.clone();
        let mut callback = Some(PermissionCallback::Detailed(DetailedHooks {
            before_request: Some(Box::new(move |_| *count.lock() += 1)),
            ..DetailedHooks::default()
        }));
        fire_before_request(&mut callback, &["camera".to_string()]);
        fire_before_request(&mut callback, &["camera".to_string()]);
        assert_eq!(*fired.lock(), 1);
    }
}
