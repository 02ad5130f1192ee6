use leptos::prelude::*;
use leptos_icons::*;
use state::ui::LoadingState;

/// Full-screen overlay driven by [`LoadingState`].
#[component]
pub fn LoadingOverlay() -> impl IntoView {
    let loading = LoadingState::get();
    let progress_width = move || format!("width: {}%", loading.progress.get());

    view! {
        <Show when=move || loading.visible.get()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/70">
                <div class="flex flex-col items-center gap-6 max-w-sm w-full px-6">
                    <div class="relative w-24 h-24">
                        <div class="absolute inset-0 rounded-full border-4 border-neutral-800"></div>
                        <div class="absolute inset-0 rounded-full border-4 border-t-pink-500 border-transparent animate-spin"></div>
                        <div class="absolute inset-0 flex items-center justify-center">
                            <Icon
                                icon=icondata::AiPlayCircleOutlined
                                attr:class="text-white text-3xl"
                            />
                        </div>
                    </div>

                    <p class="text-center text-white font-semibold">
                        {move || loading.message.get()}
                    </p>

                    <div class="w-full h-2 rounded-full bg-neutral-800 overflow-hidden">
                        <div
                            class="h-full bg-pink-500 transition-all duration-300"
                            role="progressbar"
                            aria-valuemin="0"
                            aria-valuemax="100"
                            aria-valuenow=move || loading.progress.get().to_string()
                            style=progress_width
                        ></div>
                    </div>
                    <span class="text-sm text-neutral-400">
                        {move || format!("{}%", loading.progress.get())}
                    </span>
                </div>
            </div>
        </Show>
    }
}
