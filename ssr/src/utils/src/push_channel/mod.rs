#[cfg(not(feature = "hydrate"))]
mod detached;
pub mod socket_io;
#[cfg(feature = "hydrate")]
mod ws;

#[cfg(not(feature = "hydrate"))]
pub use detached::DetachedTransport as BrowserTransport;
#[cfg(feature = "hydrate")]
pub use ws::WebSocketTransport as BrowserTransport;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thiserror::Error;

use crate::events::{ProgressEvent, PushFrame};
use crate::notify::{NotificationKind, UiSink};
use crate::types::PreviewRequest;

const RELOAD_HINT: &str = "Connection error. Please refresh the page.";
const UNKNOWN_ERROR: &str = "websocket error";

/// What a transport reports back to the manager.
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelSignal {
    Connected,
    Disconnected,
    Error(String),
    Frame(PushFrame),
}

/// Reason for a transport error. Browsers usually report a bare `Event`
/// without a message.
pub fn error_reason(message: Option<String>) -> String {
    message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChannelError {
    #[error("push channel is not connected")]
    NotConnected,
    #[error("failed to encode push frame: {0}")]
    Encode(String),
    #[error("push channel transport error: {0}")]
    Transport(String),
}

/// A bidirectional event channel. Reconnection after a drop is the
/// transport's business; `close` must also cancel any pending attempt.
pub trait PushTransport {
    fn open(&self, url: &str, on_signal: Rc<dyn Fn(ChannelSignal)>) -> Result<(), ChannelError>;
    fn is_open(&self) -> bool;
    fn send(&self, frame: PushFrame) -> Result<(), ChannelError>;
    fn close(&self);
}

pub type EventHandler = Rc<dyn Fn(&ProgressEvent)>;

/// Owns the page's single push connection.
pub struct ConnectionManager<T: PushTransport> {
    transport: T,
    url: String,
    ui: Rc<dyn UiSink>,
    initialized: Rc<Cell<bool>>,
    handlers: Rc<RefCell<Vec<EventHandler>>>,
}

impl<T: PushTransport> ConnectionManager<T> {
    pub fn new(transport: T, url: impl Into<String>, ui: Rc<dyn UiSink>) -> Self {
        Self {
            transport,
            url: url.into(),
            ui,
            initialized: Rc::new(Cell::new(false)),
            handlers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_open()
    }

    /// Register a handler for decoded progress updates.
    pub fn on_event(&self, handler: EventHandler) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Open the connection once. Later calls are no-ops while it is alive;
    /// after the transport reports a drop, the next call opens it again.
    pub fn connect(&self) -> Result<(), ChannelError> {
        if self.initialized.get() {
            return Ok(());
        }
        self.initialized.set(true);

        let on_signal = {
            let handlers = self.handlers.clone();
            let initialized = self.initialized.clone();
            let ui = self.ui.clone();
            let url = self.url.clone();
            Rc::new(move |signal: ChannelSignal| {
                route_signal(&url, &handlers, &initialized, &*ui, signal)
            })
        };

        if let Err(e) = self.transport.open(&self.url, on_signal) {
            self.initialized.set(false);
            leptos::logging::error!("Failed to initialize push channel: {e}");
            self.ui.notify(RELOAD_HINT, NotificationKind::Danger);
            return Err(e);
        }
        leptos::logging::log!("Push channel initialized for {}", self.url);
        Ok(())
    }

    /// Send a preview request. Nothing is queued when the channel is down,
    /// but a dropped channel is reopened for the next attempt.
    pub fn send_preview_request(&self, req: &PreviewRequest) -> Result<(), ChannelError> {
        if !self.transport.is_open() {
            leptos::logging::error!("Push channel not connected, cannot request preview");
            self.ui.notify(RELOAD_HINT, NotificationKind::Danger);
            if !self.initialized.get() {
                let _ = self.connect();
            }
            return Err(ChannelError::NotConnected);
        }

        let sent = PushFrame::preview_request(req)
            .map_err(|e| ChannelError::Encode(e.to_string()))
            .and_then(|frame| self.transport.send(frame));

        match sent {
            Ok(()) => {
                leptos::logging::log!("Preview requested for avatar {}", req.avatar_id);
                Ok(())
            }
            Err(e) => {
                leptos::logging::error!("Error requesting preview: {e}");
                self.ui
                    .notify("Failed to request preview.", NotificationKind::Danger);
                Err(e)
            }
        }
    }

    pub fn disconnect(&self) {
        let was_initialized = self.initialized.replace(false);
        // a dropped channel may still have a reconnect pending
        self.transport.close();
        if was_initialized {
            leptos::logging::log!("Push channel closed by page");
        }
    }
}

fn route_signal(
    url: &str,
    handlers: &RefCell<Vec<EventHandler>>,
    initialized: &Cell<bool>,
    ui: &dyn UiSink,
    signal: ChannelSignal,
) {
    match signal {
        ChannelSignal::Connected => {
            initialized.set(true);
            leptos::logging::log!("Push channel connected: {url}");
        }
        ChannelSignal::Disconnected => {
            initialized.set(false);
            leptos::logging::log!("Push channel closed: {url}");
        }
        ChannelSignal::Error(reason) => {
            leptos::logging::error!("Push channel connection error: {reason}");
            ui.notify(RELOAD_HINT, NotificationKind::Danger);
        }
        ChannelSignal::Frame(frame) => match frame.into_update() {
            Ok(event) => {
                leptos::logging::log!("{} update: {:?}", event.category.event_name(), event.status);
                let handlers = handlers.borrow().clone();
                for handler in handlers {
                    handler(&event);
                }
            }
            Err(e) => leptos::logging::warn!("Dropping push frame: {e}"),
        },
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod fake {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::{ChannelError, ChannelSignal, PushTransport};
    use crate::events::PushFrame;

    /// In-memory transport; tests drive it with [`FakeTransport::emit`].
    #[derive(Clone, Default)]
    pub struct FakeTransport {
        pub opens: Rc<Cell<usize>>,
        pub closes: Rc<Cell<usize>>,
        pub open: Rc<Cell<bool>>,
        pub fail_open: Rc<Cell<bool>>,
        pub sent: Rc<RefCell<Vec<PushFrame>>>,
        on_signal: Rc<RefCell<Option<Rc<dyn Fn(ChannelSignal)>>>>,
    }

    impl FakeTransport {
        pub fn emit(&self, signal: ChannelSignal) {
            if matches!(signal, ChannelSignal::Connected) {
                self.open.set(true);
            }
            if matches!(signal, ChannelSignal::Disconnected) {
                self.open.set(false);
            }
            let cb = self.on_signal.borrow().clone();
            if let Some(cb) = cb {
                cb(signal);
            }
        }

        /// Emit a `{"event": .., "data": ..}` JSON event.
        pub fn emit_frame(&self, raw: &str) {
            let frame: PushFrame = match serde_json::from_str(raw) {
                Ok(frame) => frame,
                Err(e) => panic!("invalid test frame {raw}: {e}"),
            };
            self.emit(ChannelSignal::Frame(frame));
        }
    }

    impl PushTransport for FakeTransport {
        fn open(
            &self,
            _url: &str,
            on_signal: Rc<dyn Fn(ChannelSignal)>,
        ) -> Result<(), ChannelError> {
            if self.fail_open.get() {
                return Err(ChannelError::Transport("refused".into()));
            }
            self.opens.set(self.opens.get() + 1);
            *self.on_signal.borrow_mut() = Some(on_signal);
            Ok(())
        }

        fn is_open(&self) -> bool {
            self.open.get()
        }

        fn send(&self, frame: PushFrame) -> Result<(), ChannelError> {
            self.sent.borrow_mut().push(frame);
            Ok(())
        }

        fn close(&self) {
            self.closes.set(self.closes.get() + 1);
            self.open.set(false);
            self.on_signal.borrow_mut().take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeTransport;
    use super::*;
    use crate::events::{Category, Status};
    use crate::notify::recording::RecordingUi;

    fn manager() -> (Rc<RecordingUi>, ConnectionManager<FakeTransport>) {
        let ui = Rc::new(RecordingUi::default());
        let mgr = ConnectionManager::new(FakeTransport::default(), "ws://test/ws", ui.clone());
        (ui, mgr)
    }

    fn preview() -> PreviewRequest {
        PreviewRequest {
            text: "Hello".into(),
            avatar_id: "a1".into(),
            voice: "v1".into(),
        }
    }

    #[test]
    fn connect_is_idempotent() {
        let (_, mgr) = manager();
        mgr.connect().unwrap();
        mgr.connect().unwrap();
        mgr.connect().unwrap();
        assert_eq!(mgr.transport().opens.get(), 1);
    }

    #[test]
    fn reconnects_after_explicit_disconnect() {
        let (_, mgr) = manager();
        mgr.connect().unwrap();
        mgr.disconnect();
        mgr.connect().unwrap();
        assert_eq!(mgr.transport().opens.get(), 2);
    }

    #[test]
    fn failed_open_notifies_and_allows_retry() {
        let (ui, mgr) = manager();
        mgr.transport().fail_open.set(true);
        assert!(mgr.connect().is_err());
        assert_eq!(
            ui.notifications(),
            vec![(RELOAD_HINT.to_string(), NotificationKind::Danger)]
        );
        mgr.transport().fail_open.set(false);
        mgr.connect().unwrap();
        assert_eq!(mgr.transport().opens.get(), 1);
    }

    #[test]
    fn preview_request_needs_open_channel() {
        let (ui, mgr) = manager();
        mgr.connect().unwrap();
        assert_eq!(
            mgr.send_preview_request(&preview()),
            Err(ChannelError::NotConnected)
        );
        assert!(mgr.transport().sent.borrow().is_empty());
        assert_eq!(ui.notifications().len(), 1);

        mgr.transport().emit(ChannelSignal::Connected);
        mgr.send_preview_request(&preview()).unwrap();
        let sent = mgr.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].event, "preview_request");
        assert_eq!(sent[0].data["avatar_id"], "a1");
    }

    #[test]
    fn frames_reach_every_handler() {
        let (_, mgr) = manager();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for _ in 0..2 {
            let seen = seen.clone();
            mgr.on_event(Rc::new(move |ev: &ProgressEvent| {
                seen.borrow_mut().push((ev.category, ev.status))
            }));
        }
        mgr.connect().unwrap();
        mgr.transport()
            .emit_frame(r#"{"event":"preview_update","data":{"status":"in_progress"}}"#);
        assert_eq!(
            *seen.borrow(),
            vec![
                (Category::Preview, Status::InProgress),
                (Category::Preview, Status::InProgress)
            ]
        );
    }

    #[test]
    fn malformed_frames_are_dropped() {
        let (ui, mgr) = manager();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        mgr.on_event(Rc::new(move |_: &ProgressEvent| counter.set(counter.get() + 1)));
        mgr.connect().unwrap();
        mgr.transport()
            .emit_frame(r#"{"event":"processing_update","data":{"status":"paused"}}"#);
        mgr.transport()
            .emit_frame(r#"{"event":"connection_response","data":{"data":"Connected"}}"#);
        assert_eq!(hits.get(), 0);
        assert!(ui.calls().is_empty());
    }

    #[test]
    fn connection_error_advises_reload() {
        let (ui, mgr) = manager();
        mgr.connect().unwrap();
        mgr.transport().emit(ChannelSignal::Error("timeout".into()));
        assert_eq!(
            ui.notifications(),
            vec![(RELOAD_HINT.to_string(), NotificationKind::Danger)]
        );
        mgr.transport().emit(ChannelSignal::Disconnected);
        assert_eq!(ui.notifications().len(), 1);
    }

    #[test]
    fn dropped_channel_can_be_reopened() {
        let (_, mgr) = manager();
        mgr.connect().unwrap();
        mgr.transport().emit(ChannelSignal::Connected);
        mgr.connect().unwrap();
        assert_eq!(mgr.transport().opens.get(), 1);

        mgr.transport().emit(ChannelSignal::Disconnected);
        assert!(!mgr.is_connected());
        mgr.connect().unwrap();
        assert_eq!(mgr.transport().opens.get(), 2);

        mgr.transport().emit(ChannelSignal::Connected);
        mgr.send_preview_request(&preview()).unwrap();
        assert_eq!(mgr.transport().sent.borrow().len(), 1);
    }

    #[test]
    fn preview_request_after_drop_reopens_channel() {
        let (ui, mgr) = manager();
        mgr.connect().unwrap();
        mgr.transport().emit(ChannelSignal::Connected);
        mgr.transport().emit(ChannelSignal::Disconnected);

        assert_eq!(
            mgr.send_preview_request(&preview()),
            Err(ChannelError::NotConnected)
        );
        assert_eq!(mgr.transport().opens.get(), 2);
        assert_eq!(
            ui.notifications(),
            vec![(RELOAD_HINT.to_string(), NotificationKind::Danger)]
        );
    }

    #[test]
    fn disconnect_after_drop_still_closes_transport() {
        let (_, mgr) = manager();
        mgr.connect().unwrap();
        mgr.transport().emit(ChannelSignal::Connected);
        mgr.transport().emit(ChannelSignal::Disconnected);
        mgr.disconnect();
        assert_eq!(mgr.transport().closes.get(), 1);
    }

    #[test]
    fn error_reason_falls_back_for_bare_events() {
        assert_eq!(error_reason(None), UNKNOWN_ERROR);
        assert_eq!(error_reason(Some(String::new())), UNKNOWN_ERROR);
        assert_eq!(error_reason(Some("handshake failed".into())), "handshake failed");
    }
}
