mod avatar_grid;
mod preview_panel;
mod script_form;
mod voice_selector;

use std::rc::Rc;

use avatar_grid::AvatarGrid;
use component::theme_toggle::ThemeToggle;
use component::video_result_card::VideoResultCard;
use consts::{AVATAR_PUSH_URL, SELECTED_AVATAR_QUERY};
use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_query_map;
use preview_panel::{PreviewPanel, PreviewView};
use script_form::ScriptForm;
use state::studio::StudioController;
use state::studio_state::StudioState;
use state::ui::{LeptosUi, ResultsState};
use utils::api::HttpStudioApi;
use utils::events::{Category, ProgressEvent};
use utils::push_channel::BrowserTransport;
use voice_selector::VoiceSelector;

pub type Studio = StudioController<HttpStudioApi, BrowserTransport>;
pub type StudioHandle = StoredValue<Rc<Studio>, LocalStorage>;

pub fn new_studio() -> Rc<Studio> {
    Rc::new(StudioController::new(
        HttpStudioApi::default(),
        BrowserTransport::default(),
        AVATAR_PUSH_URL.as_str(),
        Rc::new(LeptosUi::from_context()),
        Rc::new(ResultsState::get()),
    ))
}

#[component]
pub fn AvatarStudioPage() -> impl IntoView {
    let state = StudioState::get();
    let studio: StudioHandle = StoredValue::new_local(new_studio());
    let preview = RwSignal::new(PreviewView::Idle);
    let query = use_query_map();

    studio.with_value(|s| {
        s.dispatcher().register_override(
            Category::Preview,
            Rc::new(move |event: &ProgressEvent| preview.set(PreviewView::from_event(event))),
        )
    });

    Effect::new(move |_| {
        let studio = studio.get_value();
        if let Err(e) = studio.connect() {
            leptos::logging::warn!("Studio running without push updates: {e}");
        }
        let preselect = query.with_untracked(|q| q.get(SELECTED_AVATAR_QUERY));
        leptos::task::spawn_local(async move {
            if let Some(catalog) = studio.load_catalog().await {
                state.install_catalog(catalog, preselect.as_deref());
            }
        });
    });

    on_cleanup(move || {
        studio.try_with_value(|s| s.disconnect());
    });

    view! {
        <Title text="Avatar Studio" />
        <div class="flex flex-col min-h-dvh bg-neutral-950 text-white">
            <header class="flex items-center justify-between px-6 py-4 border-b border-neutral-800">
                <a href="/" class="text-lg font-bold">"Avatar Studio"</a>
                <ThemeToggle />
            </header>

            <main class="grid grid-cols-1 lg:grid-cols-3 gap-6 p-6">
                <section class="lg:col-span-2 flex flex-col gap-6">
                    <AvatarGrid />
                    <VoiceSelector studio=studio />
                    <ScriptForm studio=studio />
                </section>
                <aside class="flex flex-col gap-6">
                    <PreviewPanel preview=preview />
                    <VideoResultCard />
                </aside>
            </main>
        </div>
    }
}
