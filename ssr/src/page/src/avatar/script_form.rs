use leptos::prelude::*;
use leptos_icons::*;
use state::studio_state::StudioState;

use super::StudioHandle;

#[component]
pub fn ScriptForm(studio: StudioHandle) -> impl IntoView {
    let state = StudioState::get();
    let char_count = move || state.selection.with(|s| s.char_count());
    let can_generate = move || state.selection.with(|s| s.can_generate());

    let on_generate = move |_: leptos::ev::MouseEvent| {
        let Some(studio) = studio.try_get_value() else {
            return;
        };
        let selection = state.selection.get_untracked();
        leptos::task::spawn_local(async move {
            studio.submit_generation(&selection).await;
        });
    };

    let on_preview = move |_: leptos::ev::MouseEvent| {
        let selection = state.selection.get_untracked();
        studio.with_value(|s| s.request_preview(&selection));
    };

    view! {
        <div class="flex flex-col gap-3">
            <label class="text-sm text-neutral-400" for="script-input">
                "What should your avatar say?"
            </label>
            <textarea
                id="script-input"
                class="w-full min-h-32 p-3 rounded-lg bg-neutral-900 border border-neutral-700 resize-y"
                placeholder="Type the script for your avatar..."
                prop:value=move || state.selection.with(|s| s.text.clone())
                on:input=move |ev| state.set_text(event_target_value(&ev))
            ></textarea>
            <div class="flex items-center justify-between text-xs text-neutral-400">
                <span>{move || format!("{} characters", char_count())}</span>
            </div>
            <div class="flex gap-3">
                <button
                    class="flex-1 h-12 rounded-lg border-2 border-neutral-600 font-bold hover:border-neutral-500 flex items-center justify-center gap-2"
                    on:click=on_preview
                >
                    <Icon icon=icondata::AiEyeOutlined attr:class="text-lg" />
                    "Preview"
                </button>
                <button
                    class="flex-1 h-12 rounded-lg bg-pink-600 font-bold hover:bg-pink-500 disabled:opacity-50 flex items-center justify-center gap-2"
                    disabled=move || !can_generate()
                    on:click=on_generate
                >
                    <Icon icon=icondata::AiVideoCameraOutlined attr:class="text-lg" />
                    "Generate Video"
                </button>
            </div>
        </div>
    }
}
