use leptos::prelude::*;
use leptos_icons::*;
use utils::events::{ProgressEvent, Status};

/// What the preview panel currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PreviewView {
    #[default]
    Idle,
    Pending {
        message: String,
        progress: Option<u8>,
    },
    Ready {
        url: String,
        text: Option<String>,
    },
    Failed(String),
}

impl PreviewView {
    pub fn from_event(event: &ProgressEvent) -> Self {
        match event.status {
            Status::Started | Status::InProgress => Self::Pending {
                message: event.message_or("Generating preview...").to_string(),
                progress: event.clamped_progress(),
            },
            Status::Completed => match event.preview_url() {
                Some(url) => Self::Ready {
                    url: url.to_string(),
                    text: event.preview_text().map(str::to_string),
                },
                None => Self::Failed("Preview finished without a video.".to_string()),
            },
            Status::Error => Self::Failed(event.message_or("Failed to generate preview.").to_string()),
        }
    }
}

#[component]
pub fn PreviewPanel(preview: RwSignal<PreviewView>) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-3 p-4 rounded-lg bg-neutral-900">
            <h2 class="font-semibold">"Lip-sync preview"</h2>
            {move || match preview.get() {
                PreviewView::Idle => {
                    view! {
                        <p class="text-sm text-neutral-400">
                            "Request a preview to hear the first words of your script."
                        </p>
                    }
                        .into_any()
                }
                PreviewView::Pending { message, progress } => {
                    view! {
                        <div class="flex items-center gap-3 text-sm text-neutral-300">
                            <Icon icon=icondata::AiLoadingOutlined attr:class="animate-spin text-lg" />
                            <span>{message}</span>
                            {progress.map(|p| view! { <span class="ml-auto">{format!("{p}%")}</span> })}
                        </div>
                    }
                        .into_any()
                }
                PreviewView::Ready { url, text } => {
                    view! {
                        <video
                            class="w-full rounded-lg bg-black aspect-video"
                            controls=true
                            autoplay=true
                            src=url
                        ></video>
                        {text.map(|t| view! { <p class="text-xs text-neutral-400 italic">{t}</p> })}
                    }
                        .into_any()
                }
                PreviewView::Failed(reason) => {
                    view! { <p class="text-sm text-red-400">{reason}</p> }.into_any()
                }
            }}
        </div>
    }
}
