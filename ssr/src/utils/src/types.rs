use consts::{AVATAR_PREVIEW_IMAGE_BASE, DEFAULT_VOICE_ID};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub id: String,
    pub name: String,
    pub category: String,
    pub gender: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "previewImage", alias = "preview")]
    pub preview_image: Option<String>,
}

impl Avatar {
    pub fn image_src(&self) -> String {
        self.preview_image
            .clone()
            .unwrap_or_else(|| format!("{AVATAR_PREVIEW_IMAGE_BASE}/{}_preview.svg", self.id))
    }

    pub fn description_or_category(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("{} avatar", self.category))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
    pub gender: String,
}

impl Voice {
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_VOICE_ID
    }
}

/// Body of `GET avatars-catalog`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub avatars: Vec<Avatar>,
    #[serde(default)]
    pub voices: Vec<Voice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateVideoRequest {
    pub text: String,
    pub avatar_id: String,
    pub voice: String,
}

/// Acknowledgement of a queued generation. The video itself arrives
/// over the push channel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationAck {
    #[serde(default, alias = "jobId")]
    pub job_id: Option<String>,
    #[serde(default)]
    pub acknowledged: Option<bool>,
    #[serde(default)]
    pub success: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateSpeechRequest {
    pub text: String,
    pub voice: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "audioPath")]
    pub audio_path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outbound `preview_request` payload. `text` is already shortened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub text: String,
    pub avatar_id: String,
    pub voice: String,
}
