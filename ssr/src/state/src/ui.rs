use leptos::prelude::*;
use utils::dispatcher::ResultSink;
use utils::notify::{NotificationKind, UiSink};

use crate::video_result::VideoResult;

#[derive(Clone, Copy, Debug)]
pub struct LoadingState {
    pub visible: RwSignal<bool>,
    pub message: RwSignal<String>,
    pub progress: RwSignal<u8>,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingState {
    pub fn new() -> Self {
        Self {
            visible: RwSignal::new(false),
            message: RwSignal::new(String::new()),
            progress: RwSignal::new(0),
        }
    }

    pub fn get() -> Self {
        let this: Self = expect_context();
        this
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub fading: bool,
}

/// Stack of auto-dismissing notifications.
#[derive(Clone, Copy, Debug)]
pub struct ToastState {
    pub toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn get() -> Self {
        let this: Self = expect_context();
        this
    }

    pub fn push(self, message: &str, kind: NotificationKind) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|t| {
            t.push(Toast {
                id,
                message: message.to_string(),
                kind,
                fading: false,
            })
        });

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use consts::{NOTIFICATION_DURATION, NOTIFICATION_FADE};
            use gloo::timers::future::TimeoutFuture;
            TimeoutFuture::new(NOTIFICATION_DURATION.as_millis() as u32).await;
            self.fade(id);
            TimeoutFuture::new(NOTIFICATION_FADE.as_millis() as u32).await;
            self.remove(id);
        });

        id
    }

    pub fn fade(self, id: u64) {
        self.toasts.update(|t| {
            if let Some(toast) = t.iter_mut().find(|t| t.id == id) {
                toast.fading = true;
            }
        });
    }

    pub fn remove(self, id: u64) {
        self.toasts.update(|t| t.retain(|toast| toast.id != id));
    }
}

/// [`UiSink`] backed by the page's loading and toast signals.
#[derive(Clone, Copy, Debug)]
pub struct LeptosUi {
    pub loading: LoadingState,
    pub toasts: ToastState,
}

impl LeptosUi {
    pub fn from_context() -> Self {
        Self {
            loading: LoadingState::get(),
            toasts: ToastState::get(),
        }
    }
}

impl UiSink for LeptosUi {
    fn show_loading(&self, message: &str) {
        self.loading.message.set(message.to_string());
        self.loading.visible.set(true);
    }

    fn hide_loading(&self) {
        self.loading.visible.set(false);
        self.loading.progress.set(0);
    }

    fn update_progress(&self, percent: u8) {
        self.loading.progress.set(percent);
    }

    fn notify(&self, message: &str, kind: NotificationKind) {
        self.toasts.push(message, kind);
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ResultsState {
    pub video: RwSignal<Option<VideoResult>>,
    pub preview_url: RwSignal<Option<String>>,
}

impl Default for ResultsState {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsState {
    pub fn new() -> Self {
        Self {
            video: RwSignal::new(None),
            preview_url: RwSignal::new(None),
        }
    }

    pub fn get() -> Self {
        let this: Self = expect_context();
        this
    }
}

impl ResultSink for ResultsState {
    fn present_video(&self, path: &str) {
        self.video.set(Some(VideoResult::new(path)));
    }

    fn present_preview(&self, url: &str) {
        self.preview_url.set(Some(url.to_string()));
    }
}
