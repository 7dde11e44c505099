//! Core request pipeline for petition.
//!
//! This crate owns the fluent request builder, the orchestrator state
//! machine, callback dispatch, and the interceptor and rate-limit seams
//! wrapped around a platform host adapter.

pub mod builder;
pub mod callback;
pub mod error;
pub mod groups;
pub mod host;
pub mod interceptor;
pub mod orchestrator;
pub mod presenter;
pub mod ratelimit;
pub mod request;

pub use builder::PermissionRequestBuilder;
pub use callback::{DetailedHooks, PermissionCallback};
pub use error::PetitionError;
pub use host::HostAdapter;
pub use interceptor::{InterceptDecision, PermissionInterceptor};
pub use orchestrator::RequestOrchestrator;
/// Re-export for convenience.
pub use petition_protocol::EventSink;
pub use presenter::{RationalePresenter, SettingsPresenter};
pub use ratelimit::RateLimiter;
pub use request::RequestSpec;
