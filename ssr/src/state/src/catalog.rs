use consts::limits::SHOWCASE_AVATAR_COUNT;
use indexmap::IndexMap;
use utils::types::{Avatar, CatalogResponse, Voice};

use crate::selection::SelectionState;

pub const GENDERS: [&str; 2] = ["male", "female"];

/// One filter pill group. `All` matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CatalogFilter {
    #[default]
    All,
    Named(String),
}

impl CatalogFilter {
    pub fn named(value: impl Into<String>) -> Self {
        Self::Named(value.into())
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name.eq_ignore_ascii_case(value),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::Named(name) => capitalize_first(name),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvatarFilters {
    pub category: CatalogFilter,
    pub gender: CatalogFilter,
}

impl AvatarFilters {
    pub fn admits(&self, avatar: &Avatar) -> bool {
        self.category.matches(&avatar.category) && self.gender.matches(&avatar.gender)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvatarCatalog {
    avatars: Vec<Avatar>,
    voices: Vec<Voice>,
}

impl From<CatalogResponse> for AvatarCatalog {
    fn from(res: CatalogResponse) -> Self {
        Self {
            avatars: res.avatars,
            voices: res.voices,
        }
    }
}

impl AvatarCatalog {
    pub fn avatars(&self) -> &[Avatar] {
        &self.avatars
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty()
    }

    pub fn find_avatar(&self, id: &str) -> Option<&Avatar> {
        self.avatars.iter().find(|a| a.id == id)
    }

    pub fn find_voice(&self, id: &str) -> Option<&Voice> {
        self.voices.iter().find(|v| v.id == id)
    }

    pub fn filtered<'a>(&'a self, filters: &'a AvatarFilters) -> impl Iterator<Item = &'a Avatar> {
        self.avatars.iter().filter(move |a| filters.admits(a))
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for avatar in &self.avatars {
            if !seen.contains(&avatar.category.as_str()) {
                seen.push(&avatar.category);
            }
        }
        seen
    }

    pub fn voices_by_language(&self) -> IndexMap<&str, Vec<&Voice>> {
        let mut groups: IndexMap<&str, Vec<&Voice>> = IndexMap::new();
        for voice in &self.voices {
            groups.entry(voice.language.as_str()).or_default().push(voice);
        }
        groups
    }

    /// The preferred default voice, else the first one listed.
    pub fn default_voice(&self) -> Option<&Voice> {
        self.voices
            .iter()
            .find(|v| v.is_default())
            .or_else(|| self.voices.first())
    }

    /// Avatars featured on the home page.
    pub fn showcase(&self) -> &[Avatar] {
        let end = self.avatars.len().min(SHOWCASE_AVATAR_COUNT);
        &self.avatars[..end]
    }

    /// Select `id` if the catalog knows it. Unknown ids are ignored.
    pub fn select_avatar(&self, selection: &mut SelectionState, id: &str) -> bool {
        if self.find_avatar(id).is_none() {
            leptos::logging::warn!("Ignoring selection of unknown avatar {id}");
            return false;
        }
        selection.selected_avatar_id = Some(id.to_string());
        true
    }

    /// Fill in the default voice when none is chosen yet.
    pub fn apply_default_voice(&self, selection: &mut SelectionState) {
        if selection.selected_voice_id.is_some() {
            return;
        }
        selection.selected_voice_id = self.default_voice().map(|v| v.id.clone());
    }

    /// Drop the avatar selection if the filters now hide it.
    pub fn reconcile_selection(&self, filters: &AvatarFilters, selection: &mut SelectionState) {
        let Some(id) = selection.selected_avatar_id.as_deref() else {
            return;
        };
        let visible = self.find_avatar(id).is_some_and(|a| filters.admits(a));
        if !visible {
            selection.selected_avatar_id = None;
        }
    }
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
