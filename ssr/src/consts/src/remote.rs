use once_cell::sync::Lazy;
use reqwest::Url;

const DEFAULT_API_BASE: &str = "http://localhost:5000/api/";
const DEFAULT_PUSH_URL: &str = "ws://localhost:5000/";

fn parse_or_default(raw: Option<&'static str>, default: &'static str) -> Url {
    raw.and_then(|raw| Url::parse(raw).ok())
        .unwrap_or_else(|| Url::parse(default).expect("default url is valid"))
}

/// Base for the backend HTTP endpoints. Must end with `/` so relative
/// endpoint paths join under it.
pub static AVATAR_API_BASE: Lazy<Url> =
    Lazy::new(|| parse_or_default(option_env!("AVATAR_API_BASE"), DEFAULT_API_BASE));

/// Origin of the Socket.IO server. The engine path is appended when the
/// channel opens.
pub static AVATAR_PUSH_URL: Lazy<Url> =
    Lazy::new(|| parse_or_default(option_env!("AVATAR_PUSH_URL"), DEFAULT_PUSH_URL));
