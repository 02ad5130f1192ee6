use consts::share::PLATFORMS;
use leptos::prelude::*;
use leptos_icons::*;
use state::catalog::capitalize_first;
use state::ui::{LeptosUi, ResultsState};
use state::video_result::{
    self, BrowserSaver, ExportOption, VideoFormat, VideoQuality,
};
use utils::browser::now_ms;

fn share_icon(platform: &str) -> icondata::Icon {
    match platform {
        "facebook" => icondata::AiFacebookFilled,
        "twitter" => icondata::AiTwitterOutlined,
        "linkedin" => icondata::AiLinkedinFilled,
        _ => icondata::AiShareAltOutlined,
    }
}

fn export_icon(option: ExportOption) -> icondata::Icon {
    match option {
        ExportOption::AudioOnly => icondata::AiSoundOutlined,
        ExportOption::Thumbnail => icondata::AiPictureOutlined,
        ExportOption::Gif => icondata::AiGifOutlined,
    }
}

#[component]
fn FormatChoice(format: VideoFormat) -> impl IntoView {
    let results = ResultsState::get();
    let checked = move || results.video.with(|v| v.as_ref().map(|v| v.format) == Some(format));

    view! {
        <label class="flex items-center gap-2 text-sm cursor-pointer">
            <input
                type="radio"
                name="video-format"
                prop:checked=checked
                on:change=move |_| {
                    results.video.update(|v| {
                        if let Some(v) = v {
                            v.format = format;
                        }
                    })
                }
            />
            {format.label()}
        </label>
    }
}

#[component]
fn QualityChoice(quality: VideoQuality) -> impl IntoView {
    let results = ResultsState::get();
    let checked = move || results.video.with(|v| v.as_ref().map(|v| v.quality) == Some(quality));

    view! {
        <label class="flex items-center gap-2 text-sm cursor-pointer">
            <input
                type="radio"
                name="video-quality"
                prop:checked=checked
                on:change=move |_| {
                    results.video.update(|v| {
                        if let Some(v) = v {
                            v.quality = quality;
                        }
                    })
                }
            />
            {quality.label()}
        </label>
    }
}

/// The generated video with download, share and export actions.
#[component]
pub fn VideoResultCard() -> impl IntoView {
    let results = ResultsState::get();
    let ui = LeptosUi::from_context();
    let video_src = move || results.video.with(|v| v.as_ref().map(|v| v.path.clone()));

    let on_download = move |_: leptos::ev::MouseEvent| {
        results.video.with_untracked(|v| {
            video_result::download(v.as_ref(), &ui, &BrowserSaver, now_ms())
        })
    };

    view! {
        <div class="flex flex-col gap-6 p-4 rounded-lg bg-neutral-900">
            <Show
                when=move || video_src().is_some()
                fallback=|| {
                    view! {
                        <div class="flex items-center justify-center aspect-video rounded-lg bg-neutral-800 text-neutral-400">
                            "Your generated video will appear here"
                        </div>
                    }
                }
            >
                <video
                    class="w-full rounded-lg bg-black aspect-video"
                    controls=true
                    autoplay=true
                    preload="metadata"
                    src=video_src
                >
                    <p class="text-white p-4">"Your browser doesn't support video playback."</p>
                </video>
            </Show>

            <div class="grid grid-cols-2 gap-4">
                <div class="flex flex-col gap-2">
                    <span class="text-neutral-400 text-sm">"Format"</span>
                    {VideoFormat::ALL
                        .into_iter()
                        .map(|format| view! { <FormatChoice format=format /> })
                        .collect_view()}
                </div>
                <div class="flex flex-col gap-2">
                    <span class="text-neutral-400 text-sm">"Quality"</span>
                    {VideoQuality::ALL
                        .into_iter()
                        .map(|quality| view! { <QualityChoice quality=quality /> })
                        .collect_view()}
                </div>
            </div>

            <button
                class="w-full h-12 rounded-lg font-bold text-white bg-pink-600 hover:bg-pink-500 flex items-center justify-center gap-2"
                on:click=on_download
            >
                <Icon icon=icondata::AiDownloadOutlined attr:class="text-lg" />
                "Download"
            </button>

            <div class="flex items-center gap-3">
                <span class="text-neutral-400 text-sm">"Share"</span>
                {PLATFORMS
                    .into_iter()
                    .map(|platform| {
                        view! {
                            <button
                                class="p-2 rounded-full bg-neutral-800 text-white hover:bg-neutral-700"
                                aria-label=format!("Share to {}", capitalize_first(platform))
                                on:click=move |_| {
                                    results.video.with_untracked(|v| {
                                        video_result::share(v.as_ref(), platform, &ui)
                                    })
                                }
                            >
                                <Icon icon=share_icon(platform) attr:class="text-lg" />
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="grid grid-cols-3 gap-3">
                {ExportOption::ALL
                    .into_iter()
                    .map(|option| {
                        view! {
                            <button
                                class="flex flex-col items-center gap-2 p-3 rounded-lg bg-neutral-800 text-white text-xs hover:bg-neutral-700"
                                on:click=move |_| video_result::export(option, &ui)
                            >
                                <Icon icon=export_icon(option) attr:class="text-2xl" />
                                {option.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
