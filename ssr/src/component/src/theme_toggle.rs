use codee::string::FromToStringCodec;
use consts::THEME_STORE;
use leptos::prelude::*;
use leptos_icons::*;
use leptos_use::storage::use_local_storage;
use leptos_use::use_preferred_dark;
use state::theme::{toggle_theme, PreferenceStore, Theme, DARK_MODE_CLASS};
use utils::browser::set_body_class;

#[derive(Clone, Copy)]
struct LocalThemeStore {
    stored: Signal<String>,
    set_stored: WriteSignal<String>,
}

impl PreferenceStore for LocalThemeStore {
    fn load(&self) -> Option<Theme> {
        Theme::parse(&self.stored.get())
    }

    fn store(&self, theme: Theme) {
        self.set_stored.set(theme.as_str().to_string());
    }
}

/// Switches between light and dark mode and remembers the choice.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let (stored, set_stored, _) = use_local_storage::<String, FromToStringCodec>(THEME_STORE);
    let store = LocalThemeStore { stored, set_stored };
    let prefers_dark = use_preferred_dark();
    let theme = Signal::derive(move || Theme::resolve_initial(store.load(), prefers_dark.get()));

    Effect::new(move |_| set_body_class(DARK_MODE_CLASS, theme.get().is_dark()));

    view! {
        <button
            class="p-2 rounded-full text-xl hover:bg-neutral-800/30 transition-colors"
            aria-label="Toggle theme"
            on:click=move |_| {
                toggle_theme(theme.get_untracked(), &store);
            }
        >
            {move || {
                if theme.get().is_dark() {
                    view! { <Icon icon=icondata::BsSun /> }.into_any()
                } else {
                    view! { <Icon icon=icondata::BsMoon /> }.into_any()
                }
            }}
        </button>
    }
}
