use component::theme_toggle::ThemeToggle;
use consts::SELECTED_AVATAR_QUERY;
use leptos::prelude::*;
use leptos_icons::*;
use leptos_meta::Title;
use utils::types::Avatar;

use crate::avatar::new_studio;

fn studio_link(avatar: &Avatar) -> String {
    format!(
        "/avatar?{SELECTED_AVATAR_QUERY}={}",
        urlencoding::encode(&avatar.id)
    )
}

#[component]
fn ShowcaseCard(avatar: Avatar) -> impl IntoView {
    view! {
        <a
            href=studio_link(&avatar)
            class="flex flex-col gap-2 p-3 rounded-lg bg-neutral-900 hover:bg-neutral-800 transition-colors"
        >
            <img
                class="w-full aspect-square rounded-md object-cover bg-neutral-800"
                src=avatar.image_src()
                alt=avatar.name.clone()
            />
            <span class="font-semibold">{avatar.name.clone()}</span>
            <span class="text-xs text-neutral-400">{avatar.description_or_category()}</span>
        </a>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let studio = StoredValue::new_local(new_studio());
    let showcase = LocalResource::new(move || {
        let studio = studio.get_value();
        async move {
            studio
                .load_catalog()
                .await
                .map(|catalog| catalog.showcase().to_vec())
                .unwrap_or_default()
        }
    });

    view! {
        <Title text="Avatar Studio" />
        <div class="flex flex-col min-h-dvh bg-neutral-950 text-white">
            <header class="flex items-center justify-between px-6 py-4 border-b border-neutral-800">
                <span class="text-lg font-bold">"Avatar Studio"</span>
                <ThemeToggle />
            </header>

            <section class="flex flex-col items-center gap-4 px-6 py-16 text-center">
                <h1 class="text-4xl font-bold">"Turn text into a talking avatar"</h1>
                <p class="max-w-xl text-neutral-400">
                    "Pick an avatar, choose a voice and type a script. We render a lip-synced video you can download and share."
                </p>
                <a
                    href="/avatar"
                    class="flex items-center gap-2 px-6 py-3 rounded-lg bg-pink-600 font-bold hover:bg-pink-500"
                >
                    <Icon icon=icondata::AiVideoCameraOutlined attr:class="text-lg" />
                    "Open the studio"
                </a>
            </section>

            <section class="px-6 pb-16">
                <h2 class="mb-4 text-xl font-semibold">"Featured avatars"</h2>
                <Suspense fallback=|| view! { <p class="text-neutral-400">"Loading avatars..."</p> }>
                    <div class="grid grid-cols-2 md:grid-cols-4 lg:grid-cols-6 gap-4">
                        {move || {
                            showcase
                                .get()
                                .unwrap_or_default()
                                .into_iter()
                                .map(|avatar| view! { <ShowcaseCard avatar=avatar /> })
                                .collect_view()
                        }}
                    </div>
                </Suspense>
            </section>
        </div>
    }
}
