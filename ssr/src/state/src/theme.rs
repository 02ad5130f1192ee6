use serde::{Deserialize, Serialize};

pub const DARK_MODE_CLASS: &str = "dark-mode";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// A stored preference wins over the system setting.
    pub fn resolve_initial(stored: Option<Theme>, prefers_dark: bool) -> Self {
        stored.unwrap_or(if prefers_dark { Self::Dark } else { Self::Light })
    }
}

/// Persisted theme choice.
pub trait PreferenceStore {
    fn load(&self) -> Option<Theme>;
    fn store(&self, theme: Theme);
}

/// Flip `current`, persist it and return the new theme.
pub fn toggle_theme(current: Theme, store: &dyn PreferenceStore) -> Theme {
    let next = current.toggled();
    store.store(next);
    next
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Default)]
    struct MemoryStore(Cell<Option<Theme>>);

    impl PreferenceStore for MemoryStore {
        fn load(&self) -> Option<Theme> {
            self.0.get()
        }

        fn store(&self, theme: Theme) {
            self.0.set(Some(theme));
        }
    }

    #[test]
    fn stored_preference_beats_system() {
        assert_eq!(Theme::resolve_initial(Some(Theme::Light), true), Theme::Light);
        assert_eq!(Theme::resolve_initial(None, true), Theme::Dark);
        assert_eq!(Theme::resolve_initial(None, false), Theme::Light);
    }

    #[test]
    fn toggling_twice_restores_theme_and_preference() {
        let store = MemoryStore(Cell::new(Some(Theme::Dark)));
        let start = Theme::resolve_initial(store.load(), false);

        let once = toggle_theme(start, &store);
        assert_eq!(once, Theme::Light);
        assert_eq!(store.load(), Some(Theme::Light));

        let twice = toggle_theme(once, &store);
        assert_eq!(twice, start);
        assert_eq!(store.load(), Some(Theme::Dark));
    }

    #[test]
    fn theme_round_trips_through_its_stored_name() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(Theme::parse(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::parse("sepia"), None);
    }
}
