//! Native side of the channel: the listener and its registration slot.

use std::sync::{Arc, Mutex, Weak};

use channel_common::BridgeError;
use tracing::debug;

use crate::json::JsonMap;
use crate::message::BridgeMessage;

/// Receives channel events decoded from the page.
///
/// Callbacks run on the UI thread that drives the web view.
pub trait ChannelListener: Send + Sync {
    fn on_open(&self);

    fn on_message(&self, data: JsonMap);

    fn on_close(&self);

    fn on_error(&self, code: i32, description: &str);

    /// A queued message could not be retrieved or decoded. No domain
    /// callback fires for it.
    fn on_bridge_failure(&self, _error: &BridgeError) {}
}

/// Listener used while nothing is registered.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl ChannelListener for NoopListener {
    fn on_open(&self) {}
    fn on_message(&self, _data: JsonMap) {}
    fn on_close(&self) {}
    fn on_error(&self, _code: i32, _description: &str) {}
}

/// Holds at most one listener without owning it.
///
/// The application usually owns both the listener and the controller, so a
/// strong reference here would form a cycle. Once the listener is dropped
/// the slot behaves as if empty.
#[derive(Default)]
pub struct ListenerSlot {
    inner: Mutex<Option<Weak<dyn ChannelListener>>>,
}

impl ListenerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`, replacing any previous registration.
    pub fn register<L: ChannelListener + 'static>(&self, listener: &Arc<L>) {
        let weak: Weak<dyn ChannelListener> = Arc::downgrade(listener) as Weak<L>;
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(weak);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = None;
        }
    }

    /// Whether a listener is registered and still alive.
    pub fn is_registered(&self) -> bool {
        self.current().is_some()
    }

    /// Deliver `message` to exactly one callback.
    pub fn dispatch(&self, message: BridgeMessage) {
        match self.current() {
            Some(listener) => deliver(listener.as_ref(), message),
            None => {
                debug!(kind = message.kind().as_type(), "no listener registered, event dropped");
                deliver(&NoopListener, message);
            }
        }
    }

    /// Forward a transport failure to the listener's failure hook.
    pub fn report_failure(&self, error: &BridgeError) {
        if let Some(listener) = self.current() {
            listener.on_bridge_failure(error);
        }
    }

    // The lock is released before any callback runs so listeners may
    // re-register from inside a callback.
    fn current(&self) -> Option<Arc<dyn ChannelListener>> {
        self.inner
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().and_then(Weak::upgrade))
    }
}

impl std::fmt::Debug for ListenerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSlot")
            .field("registered", &self.is_registered())
            .finish()
    }
}

fn deliver(listener: &dyn ChannelListener, message: BridgeMessage) {
    match message {
        BridgeMessage::Open => listener.on_open(),
        BridgeMessage::Message(data) => listener.on_message(data),
        BridgeMessage::Close => listener.on_close(),
        BridgeMessage::Error { code, description } => listener.on_error(code, &description),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A recorded listener invocation.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Open,
        Message(JsonMap),
        Close,
        Error(i32, String),
        Failure(String),
    }

    #[derive(Default)]
    pub(crate) struct RecordingListener {
        pub(crate) calls: Mutex<Vec<Call>>,
    }

    impl RecordingListener {
        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn push(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl ChannelListener for RecordingListener {
        fn on_open(&self) {
            self.push(Call::Open);
        }

        fn on_message(&self, data: JsonMap) {
            self.push(Call::Message(data));
        }

        fn on_close(&self) {
            self.push(Call::Close);
        }

        fn on_error(&self, code: i32, description: &str) {
            self.push(Call::Error(code, description.to_owned()));
        }

        fn on_bridge_failure(&self, error: &BridgeError) {
            self.push(Call::Failure(error.to_string()));
        }
    }

    #[test]
    fn dispatches_each_kind_to_its_callback() {
        let listener = Arc::new(RecordingListener::default());
        let slot = ListenerSlot::new();
        slot.register(&listener);

        let mut data = JsonMap::new();
        data.insert("foo".into(), "bar".into());

        slot.dispatch(BridgeMessage::Open);
        slot.dispatch(BridgeMessage::Message(data.clone()));
        slot.dispatch(BridgeMessage::Close);
        slot.dispatch(BridgeMessage::Error {
            code: 500,
            description: "boom".into(),
        });

        assert_eq!(
            listener.calls(),
            vec![
                Call::Open,
                Call::Message(data),
                Call::Close,
                Call::Error(500, "boom".into()),
            ]
        );
    }

    #[test]
    fn empty_slot_drops_events() {
        let slot = ListenerSlot::new();
        assert!(!slot.is_registered());
        slot.dispatch(BridgeMessage::Open);
        slot.report_failure(&BridgeError::EmptyQueue);
    }

    #[test]
    fn slot_does_not_keep_listener_alive() {
        let listener = Arc::new(RecordingListener::default());
        let slot = ListenerSlot::new();
        slot.register(&listener);
        assert!(slot.is_registered());
        assert_eq!(Arc::strong_count(&listener), 1);

        drop(listener);
        assert!(!slot.is_registered());
        slot.dispatch(BridgeMessage::Close);
    }

    #[test]
    fn register_replaces_previous_listener() {
        let first = Arc::new(RecordingListener::default());
        let second = Arc::new(RecordingListener::default());
        let slot = ListenerSlot::new();

        slot.register(&first);
        slot.register(&second);
        slot.dispatch(BridgeMessage::Open);

        assert!(first.calls().is_empty());
        assert_eq!(second.calls(), vec![Call::Open]);
    }

    #[test]
    fn clear_unregisters() {
        let listener = Arc::new(RecordingListener::default());
        let slot = ListenerSlot::new();
        slot.register(&listener);
        slot.clear();
        slot.dispatch(BridgeMessage::Open);
        assert!(listener.calls().is_empty());
    }

    #[test]
    fn failures_reach_the_hook_only() {
        let listener = Arc::new(RecordingListener::default());
        let slot = ListenerSlot::new();
        slot.register(&listener);
        slot.report_failure(&BridgeError::Script("page gone".into()));
        assert_eq!(
            listener.calls(),
            vec![Call::Failure("script evaluation failed: page gone".into())]
        );
    }
}
