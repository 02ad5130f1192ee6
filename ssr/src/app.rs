use component::loading_overlay::LoadingOverlay;
use component::toast::ToastContainer;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use page::avatar::AvatarStudioPage;
use page::home::HomePage;
use state::studio_state::StudioState;
use state::ui::{LoadingState, ResultsState, ToastState};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-dvh gap-4 bg-neutral-950 text-white">
            <h1 class="text-2xl font-bold">"Page not found"</h1>
            <a href="/" class="text-pink-400 underline">"Back to the studio"</a>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(LoadingState::new());
    provide_context(ToastState::new());
    provide_context(ResultsState::new());
    provide_context(StudioState::new());

    view! {
        <Stylesheet id="leptos" href="/pkg/avatar-studio-web.css" />
        <Link rel="icon" type_="image/svg+xml" href="/favicon.svg" />
        <Title text="Avatar Studio" />

        <Router>
            <main>
                <Routes fallback=NotFound>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/avatar") view=AvatarStudioPage />
                </Routes>
            </main>
        </Router>
        <LoadingOverlay />
        <ToastContainer />
    }
}
