use consts::limits::{PREVIEW_TEXT_LIMIT, PREVIEW_TRUNCATION_MARKER};
use thiserror::Error;
use utils::types::{GenerateVideoRequest, PreviewRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an avatar and voice.")]
    MissingAvatar,
    #[error("Please select an avatar and voice.")]
    MissingVoice,
    #[error("Please enter text for the avatar to speak.")]
    EmptyText,
}

/// The user's current avatar, voice and script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_avatar_id: Option<String>,
    pub selected_voice_id: Option<String>,
    pub text: String,
}

/// A selection that passed [`SelectionState::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidSelection<'a> {
    pub avatar_id: &'a str,
    pub voice_id: &'a str,
    pub text: &'a str,
}

impl SelectionState {
    pub fn validate(&self) -> Result<ValidSelection<'_>, ValidationError> {
        let avatar_id = self
            .selected_avatar_id
            .as_deref()
            .ok_or(ValidationError::MissingAvatar)?;
        let voice_id = self
            .selected_voice_id
            .as_deref()
            .ok_or(ValidationError::MissingVoice)?;
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(ValidSelection {
            avatar_id,
            voice_id,
            text: &self.text,
        })
    }

    /// Whether the generate button should be enabled. Voice is checked
    /// on submit, matching the form's behaviour.
    pub fn can_generate(&self) -> bool {
        self.selected_avatar_id.is_some() && !self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl ValidSelection<'_> {
    pub fn generate_request(&self) -> GenerateVideoRequest {
        GenerateVideoRequest {
            text: self.text.to_string(),
            avatar_id: self.avatar_id.to_string(),
            voice: self.voice_id.to_string(),
        }
    }

    pub fn preview_request(&self) -> PreviewRequest {
        PreviewRequest {
            text: preview_text(self.text),
            avatar_id: self.avatar_id.to_string(),
            voice: self.voice_id.to_string(),
        }
    }
}

/// First [`PREVIEW_TEXT_LIMIT`] characters, marked when cut.
pub fn preview_text(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_TEXT_LIMIT) {
        Some((cut, _)) => format!("{}{PREVIEW_TRUNCATION_MARKER}", &text[..cut]),
        None => text.to_string(),
    }
}
