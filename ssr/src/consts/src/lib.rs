mod remote;
pub use remote::*;

pub mod limits;

use web_time::Duration;

pub const THEME_STORE: &str = "theme";
pub const SELECTED_AVATAR_QUERY: &str = "selected";

pub const DEFAULT_VOICE_ID: &str = "en-US-AriaNeural";
pub const DEFAULT_VOICE_SAMPLE_TEXT: &str = "This is a sample of how this voice sounds.";
pub const AVATAR_PLACEHOLDER_IMAGE: &str = "/static/images/avatar-placeholder.svg";
pub const AVATAR_PREVIEW_IMAGE_BASE: &str = "/static/images/avatars";

pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(5000);
// fade-out before the toast leaves the DOM
pub const NOTIFICATION_FADE: Duration = Duration::from_millis(150);

// socket.io client defaults
pub const RECONNECT_DELAY: Duration = Duration::from_millis(1000);
pub const RECONNECT_DELAY_MAX: Duration = Duration::from_millis(5000);

pub mod paths {
    pub const AVATARS_CATALOG: &str = "avatars-catalog";
    pub const GENERATE_VIDEO: &str = "generate-video";
    pub const GENERATE_SPEECH: &str = "generate-speech";
}

pub mod push_events {
    pub const PROCESSING_UPDATE: &str = "processing_update";
    pub const PREVIEW_UPDATE: &str = "preview_update";
    pub const PREVIEW_REQUEST: &str = "preview_request";
}

pub mod share {
    pub const PLATFORMS: [&str; 3] = ["facebook", "twitter", "linkedin"];
}
