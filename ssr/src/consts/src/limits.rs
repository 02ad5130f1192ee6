/// Characters of the script forwarded with a preview request.
pub const PREVIEW_TEXT_LIMIT: usize = 50;
pub const PREVIEW_TRUNCATION_MARKER: &str = "...";

pub const SHOWCASE_AVATAR_COUNT: usize = 12;

pub const MAX_PROGRESS: u8 = 100;
