//! Per-permission request throttling.
//!
//! Prevents an application from hammering the user with permission dialogs:
//! a minimum interval between requests for one permission plus a cap on
//! requests inside a sliding window. Shared across builders via `Arc` so
//! history survives individual request cycles; nothing is persisted.

use log::debug;
use parking_lot::Mutex;
use petition_config::RateLimitConfig;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Sliding-window rate limiter keyed by permission name.
#[derive(Debug)]
pub struct RateLimiter {
    enabled: bool,
    min_interval: Duration,
    max_per_window: usize,
    window: Duration,
    history: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter from config.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            min_interval: Duration::from_millis(config.min_interval_ms),
            max_per_window: config.max_requests_per_window,
            window: Duration::from_millis(config.window_ms),
            history: Mutex::new(HashMap::new()),
        }
    }

    /// Whether a request for the permission is currently allowed.
    pub fn check(&self, permission: &str) -> bool {
        if !self.enabled {
            return true;
        }
        let now = Instant::now();
        let mut history = self.history.lock();
        let Some(times) = history.get_mut(permission) else {
            return true;
        };
        Self::prune(times, now, self.window);
        if let Some(last) = times.last() {
            if now.duration_since(*last) < self.min_interval {
                debug!("permission request throttled by interval (permission={permission})");
                return false;
            }
        }
        if times.len() >= self.max_per_window {
            debug!("permission request throttled by window cap (permission={permission})");
            return false;
        }
        true
    }

    /// Record that a request for the permission was issued.
    pub fn record(&self, permission: &str) {
        if !self.enabled {
            return;
        }
        let now = Instant::now();
        let mut history = self.history.lock();
        let times = history.entry(permission.to_string()).or_default();
        times.push(now);
        Self::prune(times, now, self.window);
    }

    /// Requests still allowed for the permission inside the current window.
    pub fn remaining(&self, permission: &str) -> usize {
        if !self.enabled {
            return self.max_per_window;
        }
        let now = Instant::now();
        let mut history = self.history.lock();
        let Some(times) = history.get_mut(permission) else {
            return self.max_per_window;
        };
        Self::prune(times, now, self.window);
        self.max_per_window.saturating_sub(times.len())
    }

    /// Forget request history for one permission.
    pub fn clear(&self, permission: &str) {
        self.history.lock().remove(permission);
    }

    /// Forget all request history.
    pub fn clear_all(&self) {
        self.history.lock().clear();
    }

    fn prune(times: &mut Vec<Instant>, now: Instant, window: Duration) {
        times.retain(|t| now.duration_since(*t) < window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn limiter(min_interval_ms: u64, max_per_window: usize) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            enabled: true,
            min_interval_ms,
            max_requests_per_window: max_per_window,
            window_ms: 60_000,
        })
    }

    #[test]
    fn disabled_limiter_always_allows() {
        let limiter = RateLimiter::new(&RateLimitConfig::default());
        for _ in 0..100 {
            assert_eq!(limiter.check("camera"), true);
            limiter.record("camera");
        }
    }

    #[test]
    fn interval_blocks_immediate_repeat() {
        let limiter = limiter(60_000, 10);
        assert_eq!(limiter.check("camera"), true);
        limiter.record("camera");
        assert_eq!(limiter.check("camera"), false);
        // Other permissions are unaffected.
        assert_eq!(limiter.check("microphone"), true);
    }

    #[test]
    fn window_cap_blocks_after_limit() {
        let limiter = limiter(0, 3);
        for _ in 0..3 {
            assert_eq!(limiter.check("camera"), true);
            limiter.record("camera");
        }
        assert_eq!(limiter.check("camera"), false);
        assert_eq!(limiter.remaining("camera"), 0);
    }

    #[test]
    fn clear_resets_history() {
        let limiter = limiter(60_000, 10);
        limiter.record("camera");
        assert_eq!(limiter.check("camera"), false);
        limiter.clear("camera");
        assert_eq!(limiter.check("camera"), true);
    }
}
