//! Batteries-included entry point for the petition workspace.
//!
//! Most applications only need [`PermissionRequestBuilder`] plus a
//! `HostAdapter` implementation for their platform; the member crates are
//! re-exported here so a single dependency on `petition` is enough.

pub use petition_config as config;
pub use petition_core as core;
pub use petition_protocol as protocol;

pub use petition_core::PermissionRequestBuilder;
pub use petition_protocol::{PermissionResultSet, PermissionState};

/// Route the library's `log` output through `env_logger`.
///
/// Only does anything when the `logging` feature is enabled; without it the
/// host application is expected to install its own `log` backend. Safe to
/// call more than once.
#[inline]
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
