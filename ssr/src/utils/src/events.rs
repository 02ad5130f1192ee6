use consts::limits::MAX_PROGRESS;
use consts::push_events::{PREVIEW_REQUEST, PREVIEW_UPDATE, PROCESSING_UPDATE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::PreviewRequest;

/// Which job an update belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Generation,
    Preview,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Generation, Category::Preview];

    pub fn event_name(self) -> &'static str {
        match self {
            Category::Generation => PROCESSING_UPDATE,
            Category::Preview => PREVIEW_UPDATE,
        }
    }

    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            PROCESSING_UPDATE => Some(Category::Generation),
            PREVIEW_UPDATE => Some(Category::Preview),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Started,
    InProgress,
    Completed,
    Error,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressPayload {
    pub video_path: Option<String>,
    pub preview_url: Option<String>,
    pub preview_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressEvent {
    pub category: Category,
    pub status: Status,
    pub message: Option<String>,
    pub progress: Option<f64>,
    pub payload: Option<ProgressPayload>,
}

impl ProgressEvent {
    pub fn new(category: Category, status: Status) -> Self {
        Self {
            category,
            status,
            message: None,
            progress: None,
            payload: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_payload(mut self, payload: ProgressPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Server progress clamped to `0..=100`; non-finite values are dropped.
    pub fn clamped_progress(&self) -> Option<u8> {
        self.progress
            .filter(|p| p.is_finite())
            .map(|p| p.clamp(0.0, MAX_PROGRESS as f64).round() as u8)
    }

    pub fn video_path(&self) -> Option<&str> {
        self.payload.as_ref()?.video_path.as_deref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.payload.as_ref()?.preview_url.as_deref()
    }

    pub fn preview_text(&self) -> Option<&str> {
        self.payload.as_ref()?.preview_text.as_deref()
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
    }
}

#[derive(Deserialize)]
struct PreviewDataWire {
    #[serde(default)]
    preview_url: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct UpdateWire {
    status: Status,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    progress: Option<f64>,
    #[serde(default)]
    video_path: Option<String>,
    #[serde(default)]
    preview_data: Option<PreviewDataWire>,
}

impl UpdateWire {
    fn into_event(self, category: Category) -> ProgressEvent {
        let (preview_url, preview_text) = self
            .preview_data
            .map(|d| (d.preview_url, d.text))
            .unwrap_or_default();
        let payload = ProgressPayload {
            video_path: self.video_path,
            preview_url,
            preview_text,
        };
        let has_payload = payload != ProgressPayload::default();

        ProgressEvent {
            category,
            status: self.status,
            message: self.message,
            progress: self.progress,
            payload: has_payload.then_some(payload),
        }
    }
}

/// One named event on the push channel, independent of its framing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PushFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("malformed push frame: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown push event `{0}`")]
    UnknownEvent(String),
}

impl PushFrame {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    pub fn preview_request(req: &PreviewRequest) -> Result<Self, serde_json::Error> {
        Ok(Self::new(PREVIEW_REQUEST, serde_json::to_value(req)?))
    }

    /// Interpret an inbound event as a progress update.
    pub fn into_update(self) -> Result<ProgressEvent, FrameError> {
        let category = Category::from_event_name(&self.event)
            .ok_or(FrameError::UnknownEvent(self.event))?;
        let wire: UpdateWire = serde_json::from_value(self.data)?;
        Ok(wire.into_event(category))
    }
}
