use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::events::{Category, ProgressEvent, Status};
use crate::notify::{NotificationKind, UiSink};

/// Where finished jobs are rendered.
pub trait ResultSink {
    fn present_video(&self, path: &str);
    fn present_preview(&self, url: &str);
}

/// Replaces the default rendering of one category.
pub type OverrideHandler = Rc<dyn Fn(&ProgressEvent)>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Started,
    InProgress,
    Completed,
    Errored,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Errored)
    }

    fn after(status: Status) -> Self {
        match status {
            Status::Started => Phase::Started,
            Status::InProgress => Phase::InProgress,
            Status::Completed => Phase::Completed,
            Status::Error => Phase::Errored,
        }
    }
}

#[derive(Default)]
struct Track {
    phase: Cell<Phase>,
    handler: RefCell<Option<OverrideHandler>>,
}

/// Turns progress updates into loading, notification and result changes.
///
/// Generation and preview are tracked separately and never touch each
/// other's phase. A category that reached `Completed` or `Errored` ignores
/// late `Started`/`InProgress` updates until [`UpdateDispatcher::arm`] is
/// called for the next request.
pub struct UpdateDispatcher {
    ui: Rc<dyn UiSink>,
    results: Rc<dyn ResultSink>,
    generation: Track,
    preview: Track,
}

impl UpdateDispatcher {
    pub fn new(ui: Rc<dyn UiSink>, results: Rc<dyn ResultSink>) -> Self {
        Self {
            ui,
            results,
            generation: Track::default(),
            preview: Track::default(),
        }
    }

    fn track(&self, category: Category) -> &Track {
        match category {
            Category::Generation => &self.generation,
            Category::Preview => &self.preview,
        }
    }

    pub fn register_override(&self, category: Category, handler: OverrideHandler) {
        *self.track(category).handler.borrow_mut() = Some(handler);
    }

    pub fn clear_override(&self, category: Category) {
        self.track(category).handler.borrow_mut().take();
    }

    pub fn has_override(&self, category: Category) -> bool {
        self.track(category).handler.borrow().is_some()
    }

    pub fn phase(&self, category: Category) -> Phase {
        self.track(category).phase.get()
    }

    /// Reset a category before a new request is sent.
    pub fn arm(&self, category: Category) {
        self.track(category).phase.set(Phase::Idle);
    }

    /// Apply one update. Returns `false` when the update was ignored.
    pub fn dispatch(&self, event: &ProgressEvent) -> bool {
        let track = self.track(event.category);
        let current = track.phase.get();
        if current.is_terminal() && matches!(event.status, Status::Started | Status::InProgress) {
            leptos::logging::warn!(
                "ignoring late {:?} update for {:?}, already {:?}",
                event.status,
                event.category,
                current
            );
            return false;
        }
        track.phase.set(Phase::after(event.status));

        // clone out so the handler may re-register
        let handler = track.handler.borrow().clone();
        if let Some(handler) = handler {
            handler(event);
            return true;
        }

        match event.category {
            Category::Generation => self.apply_generation(event),
            Category::Preview => self.apply_preview(event),
        }
        true
    }

    fn apply_generation(&self, event: &ProgressEvent) {
        match event.status {
            Status::Started => {
                self.ui
                    .show_loading(event.message_or("Starting processing..."));
                self.ui.update_progress(0);
            }
            Status::InProgress => {
                self.ui.show_loading(event.message_or("Processing..."));
                if let Some(progress) = event.clamped_progress() {
                    self.ui.update_progress(progress);
                }
            }
            Status::Completed => {
                self.ui.hide_loading();
                match event.video_path() {
                    Some(path) => self.results.present_video(path),
                    None => leptos::logging::warn!("generation completed without a video path"),
                }
                self.ui
                    .notify("Video generated successfully!", NotificationKind::Success);
            }
            Status::Error => {
                self.ui.hide_loading();
                self.ui.notify(
                    event.message_or("An error occurred during processing."),
                    NotificationKind::Danger,
                );
            }
        }
    }

    fn apply_preview(&self, event: &ProgressEvent) {
        match event.status {
            Status::Started | Status::InProgress => {
                self.ui.show_loading(event.message_or("Generating preview..."));
                if let Some(progress) = event.clamped_progress() {
                    self.ui.update_progress(progress);
                }
            }
            Status::Completed => {
                self.ui.hide_loading();
                if let Some(url) = event.preview_url() {
                    self.results.present_preview(url);
                }
            }
            Status::Error => {
                self.ui.hide_loading();
                self.ui.notify(
                    event.message_or("Failed to generate preview."),
                    NotificationKind::Danger,
                );
            }
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod recording {
    use std::cell::RefCell;

    use super::ResultSink;

    #[derive(Default)]
    pub struct RecordingResults {
        pub videos: RefCell<Vec<String>>,
        pub previews: RefCell<Vec<String>>,
    }

    impl RecordingResults {
        pub fn current_video(&self) -> Option<String> {
            self.videos.borrow().last().cloned()
        }
    }

    impl ResultSink for RecordingResults {
        fn present_video(&self, path: &str) {
            self.videos.borrow_mut().push(path.to_string());
        }

        fn present_preview(&self, url: &str) {
            self.previews.borrow_mut().push(url.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::RecordingResults;
    use super::*;
    use crate::events::ProgressPayload;
    use crate::notify::recording::{RecordingUi, UiCall};

    fn setup() -> (Rc<RecordingUi>, Rc<RecordingResults>, UpdateDispatcher) {
        let ui = Rc::new(RecordingUi::default());
        let results = Rc::new(RecordingResults::default());
        let dispatcher = UpdateDispatcher::new(ui.clone(), results.clone());
        (ui, results, dispatcher)
    }

    fn video(path: &str) -> ProgressPayload {
        ProgressPayload {
            video_path: Some(path.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn started_shows_loading_and_resets_progress() {
        let (ui, _, d) = setup();
        d.dispatch(&ProgressEvent::new(Category::Generation, Status::Started));
        assert_eq!(
            ui.calls(),
            vec![
                UiCall::ShowLoading("Starting processing...".into()),
                UiCall::Progress(0)
            ]
        );
        assert_eq!(d.phase(Category::Generation), Phase::Started);
    }

    #[test]
    fn in_progress_clamps_progress() {
        let (ui, _, d) = setup();
        d.dispatch(
            &ProgressEvent::new(Category::Generation, Status::InProgress)
                .with_message("Synchronizing lips")
                .with_progress(180.0),
        );
        assert!(ui.loading_visible());
        assert_eq!(ui.last_progress(), Some(100));
        assert_eq!(
            ui.calls()[0],
            UiCall::ShowLoading("Synchronizing lips".into())
        );
    }

    #[test]
    fn in_progress_without_value_leaves_progress_alone() {
        let (ui, _, d) = setup();
        d.dispatch(&ProgressEvent::new(Category::Generation, Status::InProgress));
        assert_eq!(ui.last_progress(), None);
    }

    #[test]
    fn completed_generation_presents_video_once() {
        let (ui, results, d) = setup();
        d.dispatch(&ProgressEvent::new(Category::Generation, Status::InProgress).with_progress(75.0));
        d.dispatch(
            &ProgressEvent::new(Category::Generation, Status::Completed)
                .with_payload(video("/files/out.mp4")),
        );
        assert!(!ui.loading_visible());
        assert_eq!(*results.videos.borrow(), vec!["/files/out.mp4".to_string()]);
        assert!(ui
            .notifications()
            .contains(&("Video generated successfully!".into(), NotificationKind::Success)));
    }

    #[test]
    fn error_falls_back_to_generic_message() {
        let (ui, _, d) = setup();
        d.dispatch(&ProgressEvent::new(Category::Generation, Status::Error));
        d.dispatch(&ProgressEvent::new(Category::Preview, Status::Error).with_message(""));
        assert_eq!(
            ui.notifications(),
            vec![
                (
                    "An error occurred during processing.".into(),
                    NotificationKind::Danger
                ),
                ("Failed to generate preview.".into(), NotificationKind::Danger),
            ]
        );
        assert!(!ui.loading_visible());
    }

    #[test]
    fn server_error_message_is_shown() {
        let (ui, _, d) = setup();
        d.dispatch(
            &ProgressEvent::new(Category::Generation, Status::Error).with_message("Error: no GPU"),
        );
        assert_eq!(
            ui.notifications(),
            vec![("Error: no GPU".into(), NotificationKind::Danger)]
        );
    }

    #[test]
    fn completed_preview_presents_url() {
        let (_, results, d) = setup();
        d.dispatch(&ProgressEvent::new(Category::Preview, Status::Completed).with_payload(
            ProgressPayload {
                preview_url: Some("/p.mp4".into()),
                ..Default::default()
            },
        ));
        assert_eq!(*results.previews.borrow(), vec!["/p.mp4".to_string()]);
        assert!(results.videos.borrow().is_empty());
    }

    #[test]
    fn override_replaces_default_rendering_for_its_category_only() {
        let (ui, results, d) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        d.register_override(
            Category::Preview,
            Rc::new(move |ev: &ProgressEvent| sink.borrow_mut().push(ev.status)),
        );

        d.dispatch(&ProgressEvent::new(Category::Preview, Status::InProgress));
        d.dispatch(&ProgressEvent::new(Category::Preview, Status::Completed).with_payload(
            ProgressPayload {
                preview_url: Some("/p.mp4".into()),
                ..Default::default()
            },
        ));
        assert_eq!(*seen.borrow(), vec![Status::InProgress, Status::Completed]);
        assert!(ui.calls().is_empty());
        assert!(results.previews.borrow().is_empty());

        d.dispatch(&ProgressEvent::new(Category::Generation, Status::Started));
        assert!(ui.loading_visible());
    }

    #[test]
    fn cleared_override_restores_defaults() {
        let (ui, _, d) = setup();
        d.register_override(Category::Generation, Rc::new(|_: &ProgressEvent| {}));
        assert!(d.has_override(Category::Generation));
        d.clear_override(Category::Generation);
        d.dispatch(&ProgressEvent::new(Category::Generation, Status::Started));
        assert!(ui.loading_visible());
    }

    #[test]
    fn late_progress_after_completion_is_ignored() {
        let (ui, _, d) = setup();
        d.dispatch(
            &ProgressEvent::new(Category::Generation, Status::Completed)
                .with_payload(video("/files/out.mp4")),
        );
        let applied = d.dispatch(
            &ProgressEvent::new(Category::Generation, Status::InProgress).with_progress(50.0),
        );
        assert!(!applied);
        assert!(!ui.loading_visible());
        assert_eq!(d.phase(Category::Generation), Phase::Completed);
    }

    #[test]
    fn arming_accepts_a_new_cycle() {
        let (ui, results, d) = setup();
        d.dispatch(&ProgressEvent::new(Category::Generation, Status::Error));
        d.arm(Category::Generation);
        assert!(d.dispatch(&ProgressEvent::new(Category::Generation, Status::Started)));
        assert!(ui.loading_visible());
        d.dispatch(
            &ProgressEvent::new(Category::Generation, Status::Completed)
                .with_payload(video("/files/second.mp4")),
        );
        assert_eq!(results.current_video().as_deref(), Some("/files/second.mp4"));
    }

    #[test]
    fn repeated_completion_presents_each_time() {
        let (_, results, d) = setup();
        let done = ProgressEvent::new(Category::Generation, Status::Completed)
            .with_payload(video("/files/out.mp4"));
        d.dispatch(&done);
        d.dispatch(&done);
        assert_eq!(results.videos.borrow().len(), 2);
    }

    #[test]
    fn categories_do_not_share_phase() {
        let (ui, _, d) = setup();
        d.dispatch(&ProgressEvent::new(Category::Generation, Status::Completed));
        assert!(d.dispatch(&ProgressEvent::new(Category::Preview, Status::InProgress)));
        assert_eq!(d.phase(Category::Preview), Phase::InProgress);
        assert!(ui.loading_visible());
    }
}
