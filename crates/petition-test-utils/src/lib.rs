//! Test helpers shared across petition crates.

pub mod callback;
pub mod events;
pub mod host;
pub mod interceptor;
pub mod presenter;

pub use callback::{CallbackEntry, CallbackLog};
pub use events::CollectingEventSink;
pub use host::ScriptedHost;
pub use interceptor::StaticInterceptor;
pub use presenter::{StaticRationalePresenter, StaticSettingsPresenter};
