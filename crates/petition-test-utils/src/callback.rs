use parking_lot::Mutex;
use petition_protocol::Permission;
use std::sync::Arc;

/// One recorded callback invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackEntry {
    BeforeRequest(Vec<Permission>),
    Granted(Vec<Permission>),
    Denied(Vec<Permission>, Vec<Permission>),
    PermanentlyDenied(Vec<Permission>),
    Result {
        all_granted: bool,
        granted: Vec<Permission>,
        denied: Vec<Permission>,
    },
}

/// Shared log for asserting callback order and arguments.
///
/// Clone it into the builder's callback closures; every clone appends to
/// the same underlying list.
#[derive(Clone, Default)]
pub struct CallbackLog {
    entries: Arc<Mutex<Vec<CallbackEntry>>>,
}

impl CallbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: CallbackEntry) {
        self.entries.lock().push(entry);
    }

    /// Recorded invocations, in order.
    pub fn entries(&self) -> Vec<CallbackEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
