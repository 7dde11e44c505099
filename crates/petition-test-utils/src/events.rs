use parking_lot::Mutex;
use petition_protocol::{EventSink, PermissionEventMsg, PermissionEventPayload};

/// Event sink that buffers everything it receives.
#[derive(Default)]
pub struct CollectingEventSink {
    events: Mutex<Vec<PermissionEventMsg>>,
}

impl CollectingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected events, in emission order.
    pub fn events(&self) -> Vec<PermissionEventMsg> {
        self.events.lock().clone()
    }

    /// Payloads only, in emission order.
    pub fn payloads(&self) -> Vec<PermissionEventPayload> {
        self.events
            .lock()
            .iter()
            .map(|event| event.payload.clone())
            .collect()
    }
}

impl EventSink for CollectingEventSink {
    fn emit(&self, event: PermissionEventMsg) {
        self.events.lock().push(event);
    }
}
