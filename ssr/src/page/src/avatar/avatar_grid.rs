use consts::AVATAR_PLACEHOLDER_IMAGE;
use leptos::prelude::*;
use state::catalog::{CatalogFilter, GENDERS};
use state::studio_state::StudioState;
use utils::types::Avatar;

const PILL: &str = "px-3 py-1 rounded-full text-sm border transition-colors";
const PILL_ACTIVE: &str = "bg-pink-600 border-pink-600 text-white";
const PILL_IDLE: &str = "border-neutral-700 text-neutral-300 hover:border-neutral-500";

#[component]
fn FilterPill(
    filter: CatalogFilter,
    #[prop(into)] active: Signal<bool>,
    on_pick: impl Fn(CatalogFilter) + 'static,
) -> impl IntoView {
    let label = filter.label();
    view! {
        <button
            class=move || format!("{PILL} {}", if active.get() { PILL_ACTIVE } else { PILL_IDLE })
            on:click=move |_| on_pick(filter.clone())
        >
            {label}
        </button>
    }
}

fn placeholder_fallback() -> String {
    format!("this.onerror=null;this.src='{AVATAR_PLACEHOLDER_IMAGE}'")
}

#[component]
fn AvatarCard(avatar: Avatar) -> impl IntoView {
    let state = StudioState::get();
    let id = StoredValue::new(avatar.id.clone());
    let selected = move || {
        state
            .selection
            .with(|s| s.selected_avatar_id.as_deref() == Some(id.get_value().as_str()))
    };

    view! {
        <button
            class=move || {
                format!(
                    "flex flex-col gap-2 p-3 rounded-lg bg-neutral-900 border-2 text-left {}",
                    if selected() { "border-pink-500" } else { "border-transparent" },
                )
            }
            on:click=move |_| state.select_avatar(&id.get_value())
        >
            <img
                class="w-full aspect-square rounded-md object-cover bg-neutral-800"
                src=avatar.image_src()
                alt=avatar.name.clone()
                onerror=placeholder_fallback()
            />
            <span class="font-semibold">{avatar.name.clone()}</span>
            <span class="text-xs text-neutral-400">{avatar.description_or_category()}</span>
        </button>
    }
}

/// Category and gender filters over the avatar grid.
#[component]
pub fn AvatarGrid() -> impl IntoView {
    let state = StudioState::get();
    let categories = Memo::new(move |_| {
        state.catalog.with(|c| {
            c.categories()
                .into_iter()
                .map(CatalogFilter::named)
                .collect::<Vec<_>>()
        })
    });
    let visible = Memo::new(move |_| {
        state.filters.with(|f| {
            state
                .catalog
                .with(|c| c.filtered(f).cloned().collect::<Vec<_>>())
        })
    });

    let category_pill = move |filter: CatalogFilter| {
        let current = filter.clone();
        let active = Signal::derive(move || state.filters.with(|f| f.category == current));
        view! { <FilterPill filter=filter active=active on_pick=move |f| state.set_category(f) /> }
    };
    let gender_pill = move |filter: CatalogFilter| {
        let current = filter.clone();
        let active = Signal::derive(move || state.filters.with(|f| f.gender == current));
        view! { <FilterPill filter=filter active=active on_pick=move |f| state.set_gender(f) /> }
    };

    view! {
        <div class="flex flex-col gap-4">
            <div class="flex flex-wrap gap-2">
                {move || {
                    std::iter::once(CatalogFilter::All)
                        .chain(categories.get())
                        .map(category_pill)
                        .collect_view()
                }}
            </div>
            <div class="flex flex-wrap gap-2">
                {std::iter::once(CatalogFilter::All)
                    .chain(GENDERS.into_iter().map(CatalogFilter::named))
                    .map(gender_pill)
                    .collect_view()}
            </div>
            <Show
                when=move || !visible.with(Vec::is_empty)
                fallback=|| {
                    view! { <p class="text-neutral-400">"No avatars match these filters."</p> }
                }
            >
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    <For
                        each=move || visible.get()
                        key=|avatar| avatar.id.clone()
                        children=|avatar| view! { <AvatarCard avatar=avatar /> }
                    />
                </div>
            </Show>
        </div>
    }
}
