use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use super::socket_io::{self, Packet, NAMESPACE_CONNECT, PONG};
use super::{error_reason, ChannelError, ChannelSignal, PushTransport};
use crate::events::PushFrame;

#[allow(dead_code)]
struct WsHandlers {
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(Event)>,
    onclose: Closure<dyn FnMut(Event)>,
}

/// Socket.IO client over a browser `WebSocket`. Reconnects with backoff
/// after the server drops it, until [`PushTransport::close`].
#[derive(Clone, Default)]
pub struct WebSocketTransport {
    ws: Rc<RefCell<Option<WebSocket>>>,
    handlers: Rc<RefCell<Option<WsHandlers>>>,
    closing: Rc<RefCell<Rc<Cell<bool>>>>,
    joined: Rc<Cell<bool>>,
    attempts: Rc<Cell<u32>>,
}

impl WebSocketTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn schedule_reconnect(
        &self,
        url: String,
        on_signal: Rc<dyn Fn(ChannelSignal)>,
        closing: Rc<Cell<bool>>,
    ) {
        let attempt = self.attempts.get();
        self.attempts.set(attempt.saturating_add(1));
        let delay = socket_io::reconnect_delay(attempt);
        leptos::logging::log!("Reconnecting push channel in {}ms", delay.as_millis());

        let transport = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(delay.as_millis() as u32).await;
            // closed by the page, or replaced by a newer socket
            if closing.get() {
                return;
            }
            if let Err(e) = transport.open(&url, on_signal.clone()) {
                on_signal(ChannelSignal::Error(e.to_string()));
            }
        });
    }
}

fn send_raw(ws: &WebSocket, raw: &str) {
    if let Err(e) = ws.send_with_str(raw) {
        leptos::logging::warn!("failed to write push packet: {e:?}");
    }
}

impl PushTransport for WebSocketTransport {
    fn open(&self, url: &str, on_signal: Rc<dyn Fn(ChannelSignal)>) -> Result<(), ChannelError> {
        self.close();
        // fresh flag per socket so callbacks of a closed one stay silent
        let closing = Rc::new(Cell::new(false));
        *self.closing.borrow_mut() = closing.clone();
        self.joined.set(false);

        let origin = reqwest::Url::parse(url)
            .map_err(|e| ChannelError::Transport(format!("invalid push url {url}: {e}")))?;
        let endpoint = socket_io::endpoint(&origin);
        let ws = WebSocket::new(endpoint.as_str())
            .map_err(|e| ChannelError::Transport(format!("{e:?}")))?;
        *self.ws.borrow_mut() = Some(ws.clone());

        let onmessage = {
            let on_signal = on_signal.clone();
            let closing = closing.clone();
            let joined = self.joined.clone();
            let attempts = self.attempts.clone();
            let ws = ws.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                if closing.get() {
                    return;
                }
                let Some(text) = event.data().as_string() else {
                    leptos::logging::warn!("ignoring binary push packet");
                    return;
                };
                match socket_io::decode(&text) {
                    Ok(Packet::Open) => send_raw(&ws, NAMESPACE_CONNECT),
                    Ok(Packet::Ping) => send_raw(&ws, PONG),
                    Ok(Packet::Connected) => {
                        joined.set(true);
                        attempts.set(0);
                        on_signal(ChannelSignal::Connected);
                    }
                    Ok(Packet::Event(frame)) => on_signal(ChannelSignal::Frame(frame)),
                    Ok(Packet::ConnectError(reason)) => on_signal(ChannelSignal::Error(reason)),
                    Ok(Packet::Disconnected | Packet::Close) => {
                        joined.set(false);
                        leptos::logging::log!("push server closed the session");
                    }
                    Ok(Packet::Pong | Packet::Noop) => {}
                    Err(e) => leptos::logging::warn!("dropping push packet: {e}"),
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let onerror = {
            let on_signal = on_signal.clone();
            let closing = closing.clone();
            Closure::wrap(Box::new(move |event: Event| {
                if closing.get() {
                    return;
                }
                let message = event.dyn_ref::<ErrorEvent>().map(ErrorEvent::message);
                on_signal(ChannelSignal::Error(error_reason(message)));
            }) as Box<dyn FnMut(Event)>)
        };
        let onclose = {
            let transport = self.clone();
            let closing = closing.clone();
            let url = url.to_string();
            Closure::wrap(Box::new(move |event: Event| {
                if closing.get() {
                    return;
                }
                transport.joined.set(false);
                if let Some(close) = event.dyn_ref::<CloseEvent>() {
                    leptos::logging::log!("websocket closed with code {}", close.code());
                }
                on_signal(ChannelSignal::Disconnected);
                transport.schedule_reconnect(url.clone(), on_signal.clone(), closing.clone());
            }) as Box<dyn FnMut(Event)>)
        };

        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        *self.handlers.borrow_mut() = Some(WsHandlers {
            onmessage,
            onerror,
            onclose,
        });
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.joined.get()
            && self
                .ws
                .borrow()
                .as_ref()
                .is_some_and(|ws| ws.ready_state() == WebSocket::OPEN)
    }

    fn send(&self, frame: PushFrame) -> Result<(), ChannelError> {
        if !self.is_open() {
            return Err(ChannelError::NotConnected);
        }
        let ws = self.ws.borrow().clone().ok_or(ChannelError::NotConnected)?;
        let raw = socket_io::encode_event(&frame)
            .map_err(|e| ChannelError::Encode(e.to_string()))?;
        ws.send_with_str(&raw)
            .map_err(|e| ChannelError::Transport(format!("{e:?}")))
    }

    fn close(&self) {
        // also cancels a pending reconnect
        self.closing.borrow().set(true);
        self.joined.set(false);
        if let Some(ws) = self.ws.borrow_mut().take() {
            // detach before the closures are dropped
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            let _ = ws.close();
        }
        self.handlers.borrow_mut().take();
    }
}
