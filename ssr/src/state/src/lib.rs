pub mod catalog;
pub mod selection;
pub mod studio;
pub mod studio_state;
pub mod theme;
pub mod ui;
pub mod video_result;
