pub mod loading_overlay;
pub mod theme_toggle;
pub mod toast;
pub mod video_result_card;
