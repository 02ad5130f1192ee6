use std::rc::Rc;

use super::{ChannelError, ChannelSignal, PushTransport};
use crate::events::PushFrame;

/// Stand-in used when rendering outside the browser. It never opens.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedTransport;

impl DetachedTransport {
    pub fn new() -> Self {
        Self
    }
}

impl PushTransport for DetachedTransport {
    fn open(&self, url: &str, _on_signal: Rc<dyn Fn(ChannelSignal)>) -> Result<(), ChannelError> {
        Err(ChannelError::Transport(format!(
            "no browser websocket available for {url}"
        )))
    }

    fn is_open(&self) -> bool {
        false
    }

    fn send(&self, _frame: PushFrame) -> Result<(), ChannelError> {
        Err(ChannelError::NotConnected)
    }

    fn close(&self) {}
}
