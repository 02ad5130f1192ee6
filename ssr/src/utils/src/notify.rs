use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Danger,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Danger => "danger",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }
}

/// Everything the update flow is allowed to do to the page chrome.
pub trait UiSink {
    fn show_loading(&self, message: &str);
    fn hide_loading(&self);
    /// `progress` is already clamped to `0..=100`.
    fn update_progress(&self, progress: u8);
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Sink for pages that mount no overlay or toast container.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopUi;

impl UiSink for NoopUi {
    fn show_loading(&self, _message: &str) {}
    fn hide_loading(&self) {}
    fn update_progress(&self, _progress: u8) {}
    fn notify(&self, _message: &str, _kind: NotificationKind) {}
}

impl<T: UiSink + ?Sized> UiSink for Rc<T> {
    fn show_loading(&self, message: &str) {
        (**self).show_loading(message)
    }

    fn hide_loading(&self) {
        (**self).hide_loading()
    }

    fn update_progress(&self, progress: u8) {
        (**self).update_progress(progress)
    }

    fn notify(&self, message: &str, kind: NotificationKind) {
        (**self).notify(message, kind)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod recording {
    use std::cell::RefCell;

    use super::{NotificationKind, UiSink};

    #[derive(Clone, Debug, PartialEq)]
    pub enum UiCall {
        ShowLoading(String),
        HideLoading,
        Progress(u8),
        Notify(String, NotificationKind),
    }

    /// Records every call and tracks what a real overlay would display.
    #[derive(Default)]
    pub struct RecordingUi {
        calls: RefCell<Vec<UiCall>>,
    }

    impl RecordingUi {
        pub fn calls(&self) -> Vec<UiCall> {
            self.calls.borrow().clone()
        }

        pub fn loading_visible(&self) -> bool {
            self.calls
                .borrow()
                .iter()
                .rev()
                .find_map(|call| match call {
                    UiCall::ShowLoading(_) => Some(true),
                    UiCall::HideLoading => Some(false),
                    _ => None,
                })
                .unwrap_or(false)
        }

        pub fn last_progress(&self) -> Option<u8> {
            self.calls.borrow().iter().rev().find_map(|call| match call {
                UiCall::Progress(p) => Some(*p),
                _ => None,
            })
        }

        pub fn notifications(&self) -> Vec<(String, NotificationKind)> {
            self.calls
                .borrow()
                .iter()
                .filter_map(|call| match call {
                    UiCall::Notify(msg, kind) => Some((msg.clone(), *kind)),
                    _ => None,
                })
                .collect()
        }
    }

    impl UiSink for RecordingUi {
        fn show_loading(&self, message: &str) {
            self.calls
                .borrow_mut()
                .push(UiCall::ShowLoading(message.to_string()));
        }

        fn hide_loading(&self) {
            self.calls.borrow_mut().push(UiCall::HideLoading);
        }

        fn update_progress(&self, progress: u8) {
            self.calls.borrow_mut().push(UiCall::Progress(progress));
        }

        fn notify(&self, message: &str, kind: NotificationKind) {
            self.calls
                .borrow_mut()
                .push(UiCall::Notify(message.to_string(), kind));
        }
    }
}
