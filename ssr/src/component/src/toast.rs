use leptos::prelude::*;
use leptos_icons::*;
use state::ui::{Toast, ToastState};
use utils::notify::NotificationKind;

fn kind_classes(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "border-green-500 bg-green-950/90",
        NotificationKind::Danger => "border-red-500 bg-red-950/90",
        NotificationKind::Warning => "border-yellow-500 bg-yellow-950/90",
        NotificationKind::Info => "border-sky-500 bg-sky-950/90",
    }
}

fn kind_icon(kind: NotificationKind) -> icondata::Icon {
    match kind {
        NotificationKind::Success => icondata::AiCheckCircleOutlined,
        NotificationKind::Danger => icondata::AiCloseCircleOutlined,
        NotificationKind::Warning => icondata::AiWarningOutlined,
        NotificationKind::Info => icondata::AiInfoCircleOutlined,
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let toasts = ToastState::get();
    let id = toast.id;
    let class = format!(
        "alert alert-{} flex items-center gap-3 w-80 px-4 py-3 rounded-lg border-l-4 text-white shadow-lg transition-opacity duration-150 {} {}",
        toast.kind.as_str(),
        kind_classes(toast.kind),
        if toast.fading { "opacity-0" } else { "opacity-100" },
    );

    view! {
        <div class=class role="alert">
            <Icon icon=kind_icon(toast.kind) attr:class="text-xl shrink-0" />
            <span class="flex-1 text-sm">{toast.message}</span>
            <button
                class="text-neutral-300 hover:text-white"
                aria-label="Close"
                on:click=move |_| toasts.remove(id)
            >
                <Icon icon=icondata::AiCloseOutlined attr:class="text-base" />
            </button>
        </div>
    }
}

#[component]
pub fn ToastContainer() -> impl IntoView {
    let toasts = ToastState::get();

    view! {
        <div class="fixed top-4 right-4 z-[60] flex flex-col gap-2">
            <For
                each=move || toasts.toasts.get()
                key=|toast| (toast.id, toast.fading)
                children=move |toast| view! { <ToastItem toast=toast /> }
            />
        </div>
    }
}
