use utils::browser;
use utils::notify::{NotificationKind, UiSink};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VideoFormat {
    #[default]
    Mp4,
    Webm,
}

impl VideoFormat {
    pub const ALL: [VideoFormat; 2] = [VideoFormat::Mp4, VideoFormat::Webm];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mp4 => "MP4",
            Self::Webm => "WebM",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VideoQuality {
    #[default]
    High,
    Medium,
    Low,
}

impl VideoQuality {
    pub const ALL: [VideoQuality; 3] = [VideoQuality::High, VideoQuality::Medium, VideoQuality::Low];

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High (1080p)",
            Self::Medium => "Medium (720p)",
            Self::Low => "Low (480p)",
        }
    }
}

/// Export options beyond the plain download.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportOption {
    AudioOnly,
    Thumbnail,
    Gif,
}

impl ExportOption {
    pub const ALL: [ExportOption; 3] = [ExportOption::AudioOnly, ExportOption::Thumbnail, ExportOption::Gif];

    pub fn label(self) -> &'static str {
        match self {
            Self::AudioOnly => "Audio only",
            Self::Thumbnail => "Thumbnail",
            Self::Gif => "Animated GIF",
        }
    }
}

/// A finished video and the export choices made for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoResult {
    pub path: String,
    pub format: VideoFormat,
    pub quality: VideoQuality,
}

impl VideoResult {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            format: VideoFormat::default(),
            quality: VideoQuality::default(),
        }
    }

    pub fn download_file_name(&self, now_ms: u128) -> String {
        format!("avatar-video-{now_ms}.{}", self.format.extension())
    }
}

/// Saves a URL to disk, with a fallback when that is refused.
pub trait FileSaver {
    fn save(&self, href: &str, file_name: &str) -> Result<(), String>;
    fn open_fallback(&self, href: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSaver;

impl FileSaver for BrowserSaver {
    fn save(&self, href: &str, file_name: &str) -> Result<(), String> {
        browser::save_file(href, file_name)
    }

    fn open_fallback(&self, href: &str) {
        browser::open_in_new_tab(href);
    }
}

pub fn download(
    result: Option<&VideoResult>,
    ui: &dyn UiSink,
    saver: &dyn FileSaver,
    now_ms: u128,
) {
    let Some(result) = result else {
        ui.notify("No video available to download", NotificationKind::Warning);
        return;
    };
    let file_name = result.download_file_name(now_ms);
    match saver.save(&result.path, &file_name) {
        Ok(()) => ui.notify("Video download started!", NotificationKind::Success),
        Err(e) => {
            leptos::logging::error!("Error downloading video: {e}");
            ui.notify("Error downloading video", NotificationKind::Danger);
            saver.open_fallback(&result.path);
        }
    }
}

pub fn share(result: Option<&VideoResult>, platform: &str, ui: &dyn UiSink) {
    if result.is_none() {
        ui.notify("No video available to share", NotificationKind::Warning);
        return;
    }
    ui.notify(
        &format!("Sharing to {platform} will be available soon!"),
        NotificationKind::Info,
    );
}

pub fn export(option: ExportOption, ui: &dyn UiSink) {
    leptos::logging::log!("Export requested: {option:?}");
    ui.notify(
        "This export option will be available soon!",
        NotificationKind::Info,
    );
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use utils::notify::recording::RecordingUi;

    use super::*;

    #[derive(Default)]
    struct FakeSaver {
        refuse: bool,
        saved: RefCell<Vec<(String, String)>>,
        opened: RefCell<Vec<String>>,
    }

    impl FileSaver for FakeSaver {
        fn save(&self, href: &str, file_name: &str) -> Result<(), String> {
            if self.refuse {
                return Err("blocked".into());
            }
            self.saved
                .borrow_mut()
                .push((href.to_string(), file_name.to_string()));
            Ok(())
        }

        fn open_fallback(&self, href: &str) {
            self.opened.borrow_mut().push(href.to_string());
        }
    }

    #[test]
    fn new_result_uses_default_choices() {
        let result = VideoResult::new("/files/out.mp4");
        assert_eq!(result.format, VideoFormat::Mp4);
        assert_eq!(result.quality, VideoQuality::High);
    }

    #[test]
    fn download_names_file_by_timestamp_and_format() {
        let ui = RecordingUi::default();
        let saver = FakeSaver::default();
        let mut result = VideoResult::new("/files/out.mp4");
        result.format = VideoFormat::Webm;

        download(Some(&result), &ui, &saver, 1_700_000_000_123);
        assert_eq!(
            *saver.saved.borrow(),
            vec![(
                "/files/out.mp4".to_string(),
                "avatar-video-1700000000123.webm".to_string()
            )]
        );
        assert_eq!(
            ui.notifications(),
            vec![("Video download started!".into(), NotificationKind::Success)]
        );
    }

    #[test]
    fn refused_download_opens_the_video_instead() {
        let ui = RecordingUi::default();
        let saver = FakeSaver {
            refuse: true,
            ..Default::default()
        };
        download(Some(&VideoResult::new("/files/out.mp4")), &ui, &saver, 1);
        assert_eq!(*saver.opened.borrow(), vec!["/files/out.mp4".to_string()]);
        assert_eq!(
            ui.notifications(),
            vec![("Error downloading video".into(), NotificationKind::Danger)]
        );
    }

    #[test]
    fn actions_without_video_warn() {
        let ui = RecordingUi::default();
        let saver = FakeSaver::default();
        download(None, &ui, &saver, 1);
        share(None, "twitter", &ui);
        assert!(saver.saved.borrow().is_empty());
        assert_eq!(
            ui.notifications(),
            vec![
                ("No video available to download".into(), NotificationKind::Warning),
                ("No video available to share".into(), NotificationKind::Warning),
            ]
        );
    }

    #[test]
    fn share_and_export_are_announced() {
        let ui = RecordingUi::default();
        share(Some(&VideoResult::new("/v.mp4")), "linkedin", &ui);
        export(ExportOption::Gif, &ui);
        assert_eq!(
            ui.notifications(),
            vec![
                (
                    "Sharing to linkedin will be available soon!".into(),
                    NotificationKind::Info
                ),
                (
                    "This export option will be available soon!".into(),
                    NotificationKind::Info
                ),
            ]
        );
    }
}
