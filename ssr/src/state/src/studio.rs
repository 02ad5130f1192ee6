use std::rc::Rc;

use utils::api::StudioApi;
use utils::dispatcher::{ResultSink, UpdateDispatcher};
use utils::events::{Category, ProgressEvent};
use utils::notify::{NotificationKind, UiSink};
use utils::push_channel::{ChannelError, ConnectionManager, PushTransport};
use utils::types::{GenerateSpeechRequest, GenerationAck};

use crate::catalog::AvatarCatalog;
use crate::selection::SelectionState;

const PLAYBACK_ERROR: &str = "Error playing audio. Please try again.";

/// Wires the HTTP API, the push connection and the dispatcher together
/// for one studio page.
pub struct StudioController<A: StudioApi, T: PushTransport> {
    api: A,
    connection: ConnectionManager<T>,
    dispatcher: Rc<UpdateDispatcher>,
    ui: Rc<dyn UiSink>,
}

impl<A: StudioApi, T: PushTransport> StudioController<A, T> {
    pub fn new(
        api: A,
        transport: T,
        push_url: impl Into<String>,
        ui: Rc<dyn UiSink>,
        results: Rc<dyn ResultSink>,
    ) -> Self {
        let dispatcher = Rc::new(UpdateDispatcher::new(ui.clone(), results));
        let connection = ConnectionManager::new(transport, push_url, ui.clone());
        let sink = dispatcher.clone();
        connection.on_event(Rc::new(move |event: &ProgressEvent| {
            sink.dispatch(event);
        }));

        Self {
            api,
            connection,
            dispatcher,
            ui,
        }
    }

    pub fn dispatcher(&self) -> &UpdateDispatcher {
        &self.dispatcher
    }

    pub fn connection(&self) -> &ConnectionManager<T> {
        &self.connection
    }

    pub fn connect(&self) -> Result<(), ChannelError> {
        self.connection.connect()
    }

    pub fn disconnect(&self) {
        self.connection.disconnect();
    }

    pub async fn load_catalog(&self) -> Option<AvatarCatalog> {
        self.ui.show_loading("Loading avatars...");
        let res = self.api.fetch_catalog().await;
        self.ui.hide_loading();

        match res {
            Ok(catalog) => {
                leptos::logging::log!(
                    "Loaded {} avatars and {} voices",
                    catalog.avatars.len(),
                    catalog.voices.len()
                );
                Some(catalog.into())
            }
            Err(e) => {
                leptos::logging::error!("Error loading avatars: {e}");
                self.ui.notify(
                    &format!("Error loading avatars: {e}"),
                    NotificationKind::Danger,
                );
                None
            }
        }
    }

    /// Queue a video. The finished video arrives as a push update.
    pub async fn submit_generation(&self, selection: &SelectionState) -> Option<GenerationAck> {
        let valid = match selection.validate() {
            Ok(valid) => valid,
            Err(e) => {
                self.ui.notify(&e.to_string(), NotificationKind::Warning);
                return None;
            }
        };
        let req = valid.generate_request();

        self.dispatcher.arm(Category::Generation);
        self.ui.show_loading("Starting video generation...");

        match self.api.generate_video(&req).await {
            Ok(ack) => {
                leptos::logging::log!("Video generation started: {ack:?}");
                Some(ack)
            }
            Err(e) => {
                leptos::logging::error!("Error generating video: {e}");
                self.ui.hide_loading();
                self.ui
                    .notify(&format!("Error: {e}"), NotificationKind::Danger);
                None
            }
        }
    }

    /// Ask for a short lip-sync preview over the push channel.
    pub fn request_preview(&self, selection: &SelectionState) -> bool {
        let valid = match selection.validate() {
            Ok(valid) => valid,
            Err(e) => {
                self.ui.notify(&e.to_string(), NotificationKind::Warning);
                return false;
            }
        };
        self.dispatcher.arm(Category::Preview);
        self.connection
            .send_preview_request(&valid.preview_request())
            .is_ok()
    }

    /// Synthesize `text` with `voice`, returning the audio path to play.
    pub async fn sample_voice(&self, voice: Option<&str>, text: &str) -> Option<String> {
        let Some(voice) = voice.filter(|_| !text.trim().is_empty()) else {
            self.ui
                .notify("Voice and text are required for TTS", NotificationKind::Danger);
            return None;
        };
        let req = GenerateSpeechRequest {
            text: text.to_string(),
            voice: voice.to_string(),
        };

        let reason = match self.api.generate_speech(&req).await {
            Ok(res) if res.success => match res.audio_path {
                Some(path) => return Some(path),
                None => "Unknown error generating speech".to_string(),
            },
            Ok(res) => res
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "Unknown error generating speech".to_string()),
            Err(e) => e.to_string(),
        };
        leptos::logging::error!("Error generating speech: {reason}");
        self.ui
            .notify(&format!("Error: {reason}"), NotificationKind::Danger);
        None
    }

    /// A voice sample failed to play in the browser.
    pub fn report_playback_error(&self, reason: &str) {
        leptos::logging::error!("Error playing audio: {reason}");
        self.ui.notify(PLAYBACK_ERROR, NotificationKind::Danger);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::executor::block_on;
    use utils::api::ApiError;
    use utils::dispatcher::recording::RecordingResults;
    use utils::notify::recording::RecordingUi;
    use utils::push_channel::fake::FakeTransport;
    use utils::push_channel::ChannelSignal;
    use utils::types::{
        Avatar, CatalogResponse, GenerateVideoRequest, SpeechResponse, Voice,
    };

    use super::*;

    #[derive(Default)]
    struct FakeApi {
        fail: Cell<bool>,
        speech: RefCell<SpeechResponse>,
        video_requests: RefCell<Vec<GenerateVideoRequest>>,
        calls: Cell<usize>,
    }

    impl StudioApi for FakeApi {
        async fn fetch_catalog(&self) -> Result<CatalogResponse, ApiError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail.get() {
                return Err(ApiError::Status {
                    context: "Failed to fetch avatars",
                    status: 503,
                });
            }
            Ok(CatalogResponse {
                avatars: vec![Avatar {
                    id: "a1".into(),
                    name: "Alex".into(),
                    category: "business".into(),
                    gender: "male".into(),
                    description: None,
                    preview_image: None,
                }],
                voices: vec![Voice {
                    id: "v1".into(),
                    name: "Voice".into(),
                    language: "English".into(),
                    gender: "female".into(),
                }],
            })
        }

        async fn generate_video(
            &self,
            req: &GenerateVideoRequest,
        ) -> Result<GenerationAck, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.video_requests.borrow_mut().push(req.clone());
            if self.fail.get() {
                return Err(ApiError::Transport("Failed to generate video: offline".into()));
            }
            Ok(GenerationAck {
                job_id: Some("job-1".into()),
                ..Default::default()
            })
        }

        async fn generate_speech(
            &self,
            _req: &GenerateSpeechRequest,
        ) -> Result<SpeechResponse, ApiError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.speech.borrow().clone())
        }
    }

    type Studio = StudioController<FakeApi, FakeTransport>;

    fn studio() -> (Rc<RecordingUi>, Rc<RecordingResults>, Studio) {
        let ui = Rc::new(RecordingUi::default());
        let results = Rc::new(RecordingResults::default());
        let studio = StudioController::new(
            FakeApi::default(),
            FakeTransport::default(),
            "ws://test/ws",
            ui.clone(),
            results.clone(),
        );
        (ui, results, studio)
    }

    fn selection(avatar: Option<&str>, voice: Option<&str>, text: &str) -> SelectionState {
        SelectionState {
            selected_avatar_id: avatar.map(str::to_string),
            selected_voice_id: voice.map(str::to_string),
            text: text.to_string(),
        }
    }

    #[test]
    fn generation_completes_over_push_channel() {
        let (ui, results, studio) = studio();
        studio.connect().unwrap();
        studio.connection().transport().emit(ChannelSignal::Connected);

        let ack = block_on(studio.submit_generation(&selection(Some("a1"), Some("v1"), "Hello world")));
        assert_eq!(ack.and_then(|a| a.job_id).as_deref(), Some("job-1"));
        assert!(ui.loading_visible());

        let transport = studio.connection().transport();
        transport.emit_frame(r#"{"event":"processing_update","data":{"status":"started"}}"#);
        transport.emit_frame(
            r#"{"event":"processing_update","data":{"status":"in_progress","progress":40}}"#,
        );
        transport.emit_frame(
            r#"{"event":"processing_update","data":{"status":"completed","video_path":"/files/out.mp4"}}"#,
        );

        assert_eq!(results.current_video().as_deref(), Some("/files/out.mp4"));
        assert!(!ui.loading_visible());
    }

    #[test]
    fn missing_avatar_never_reaches_the_api() {
        let (ui, _, studio) = studio();
        let ack = block_on(studio.submit_generation(&selection(None, Some("v1"), "Hi")));
        assert!(ack.is_none());
        assert_eq!(studio.api.calls.get(), 0);
        assert_eq!(
            ui.notifications(),
            vec![(
                "Please select an avatar and voice.".into(),
                NotificationKind::Warning
            )]
        );
        assert!(!ui.loading_visible());
    }

    #[test]
    fn blank_text_warns_with_its_own_message() {
        let (ui, _, studio) = studio();
        block_on(studio.submit_generation(&selection(Some("a1"), Some("v1"), "   ")));
        assert_eq!(
            ui.notifications(),
            vec![(
                "Please enter text for the avatar to speak.".into(),
                NotificationKind::Warning
            )]
        );
    }

    #[test]
    fn failed_submission_hides_loading() {
        let (ui, _, studio) = studio();
        studio.api.fail.set(true);
        let ack = block_on(studio.submit_generation(&selection(Some("a1"), Some("v1"), "Hello")));
        assert!(ack.is_none());
        assert!(!ui.loading_visible());
        assert_eq!(
            ui.notifications(),
            vec![(
                "Error: Failed to generate video: offline".into(),
                NotificationKind::Danger
            )]
        );
    }

    #[test]
    fn resubmitting_rearms_after_completion() {
        let (ui, results, studio) = studio();
        studio.connect().unwrap();
        let transport = studio.connection().transport();
        let done = |path: &str| {
            format!(
                r#"{{"event":"processing_update","data":{{"status":"completed","video_path":"{path}"}}}}"#
            )
        };

        block_on(studio.submit_generation(&selection(Some("a1"), Some("v1"), "One")));
        transport.emit_frame(&done("/files/one.mp4"));
        block_on(studio.submit_generation(&selection(Some("a1"), Some("v1"), "Two")));
        transport.emit_frame(r#"{"event":"processing_update","data":{"status":"in_progress","progress":10}}"#);
        assert!(ui.loading_visible());
        transport.emit_frame(&done("/files/two.mp4"));
        assert_eq!(results.current_video().as_deref(), Some("/files/two.mp4"));
    }

    #[test]
    fn catalog_load_toggles_loading_and_reports_failure() {
        let (ui, _, studio) = studio();
        let catalog = block_on(studio.load_catalog()).unwrap();
        assert_eq!(catalog.avatars().len(), 1);
        assert!(!ui.loading_visible());

        studio.api.fail.set(true);
        assert!(block_on(studio.load_catalog()).is_none());
        assert_eq!(
            ui.notifications(),
            vec![(
                "Error loading avatars: Failed to fetch avatars (status 503)".into(),
                NotificationKind::Danger
            )]
        );
    }

    #[test]
    fn preview_sends_truncated_text_when_connected() {
        let (ui, _, studio) = studio();
        studio.connect().unwrap();
        studio.connection().transport().emit(ChannelSignal::Connected);

        let long = "x".repeat(80);
        assert!(studio.request_preview(&selection(Some("a1"), Some("v1"), &long)));
        let sent = studio.connection().transport().sent.borrow().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].data["text"], format!("{}...", "x".repeat(50)));
        assert!(ui.notifications().is_empty());
    }

    #[test]
    fn preview_without_voice_sends_nothing() {
        let (ui, _, studio) = studio();
        studio.connect().unwrap();
        studio.connection().transport().emit(ChannelSignal::Connected);
        assert!(!studio.request_preview(&selection(Some("a1"), None, "Hi")));
        assert!(studio.connection().transport().sent.borrow().is_empty());
        assert_eq!(ui.notifications()[0].1, NotificationKind::Warning);
    }

    #[test]
    fn voice_sample_returns_audio_path() {
        let (ui, _, studio) = studio();
        *studio.api.speech.borrow_mut() = SpeechResponse {
            success: true,
            audio_path: Some("/audio/sample.mp3".into()),
            error: None,
        };
        let path = block_on(studio.sample_voice(Some("v1"), "Hello there"));
        assert_eq!(path.as_deref(), Some("/audio/sample.mp3"));
        assert!(ui.notifications().is_empty());
    }

    #[test]
    fn voice_sample_failures_are_reported() {
        let (ui, _, studio) = studio();
        assert!(block_on(studio.sample_voice(None, "Hello")).is_none());
        assert_eq!(studio.api.calls.get(), 0);

        *studio.api.speech.borrow_mut() = SpeechResponse {
            success: false,
            audio_path: None,
            error: Some("voice unavailable".into()),
        };
        block_on(studio.sample_voice(Some("v1"), "Hello"));

        *studio.api.speech.borrow_mut() = SpeechResponse::default();
        block_on(studio.sample_voice(Some("v1"), "Hello"));

        assert_eq!(
            ui.notifications(),
            vec![
                (
                    "Voice and text are required for TTS".into(),
                    NotificationKind::Danger
                ),
                ("Error: voice unavailable".into(), NotificationKind::Danger),
                (
                    "Error: Unknown error generating speech".into(),
                    NotificationKind::Danger
                ),
            ]
        );
    }

    #[test]
    fn playback_failure_raises_danger_notice() {
        let (ui, _, studio) = studio();
        studio.report_playback_error("NotAllowedError: play() failed");
        assert_eq!(
            ui.notifications(),
            vec![(
                "Error playing audio. Please try again.".into(),
                NotificationKind::Danger
            )]
        );
    }
}
