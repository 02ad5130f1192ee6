use std::rc::Rc;

use consts::DEFAULT_VOICE_SAMPLE_TEXT;
use leptos::prelude::*;
use leptos_icons::*;
use state::studio_state::StudioState;
use utils::types::Voice;

use super::{Studio, StudioHandle};

#[cfg(feature = "hydrate")]
fn play_sample(path: &str, studio: Rc<Studio>) {
    use std::cell::RefCell;
    use utils::browser::{play_audio, Playback};

    thread_local! {
        static CURRENT: RefCell<Option<Playback>> = const { RefCell::new(None) };
    }

    let on_error: Rc<dyn Fn(String)> =
        Rc::new(move |reason: String| studio.report_playback_error(&reason));
    CURRENT.with(|current| {
        if let Some(previous) = current.borrow_mut().take() {
            previous.stop();
        }
        match play_audio(path, on_error.clone()) {
            Ok(playback) => *current.borrow_mut() = Some(playback),
            Err(e) => on_error(e),
        }
    });
}

#[cfg(not(feature = "hydrate"))]
fn play_sample(_path: &str, _studio: Rc<Studio>) {}

fn voice_label(voice: &Voice) -> String {
    format!("{} ({})", voice.name, voice.gender)
}

/// Voice picker grouped by language, with a spoken sample.
#[component]
pub fn VoiceSelector(studio: StudioHandle) -> impl IntoView {
    let state = StudioState::get();
    let sampling = RwSignal::new(false);

    let groups = Memo::new(move |_| {
        state.catalog.with(|c| {
            c.voices_by_language()
                .into_iter()
                .map(|(lang, voices)| {
                    (
                        lang.to_string(),
                        voices.into_iter().cloned().collect::<Vec<_>>(),
                    )
                })
                .collect::<Vec<_>>()
        })
    });
    let selected = move || {
        state
            .selection
            .with(|s| s.selected_voice_id.clone().unwrap_or_default())
    };

    let on_test = move |_: leptos::ev::MouseEvent| {
        let Some(studio) = studio.try_get_value() else {
            return;
        };
        let (voice, script) = state
            .selection
            .with_untracked(|s| (s.selected_voice_id.clone(), s.text.clone()));
        let text = if script.trim().is_empty() {
            DEFAULT_VOICE_SAMPLE_TEXT.to_string()
        } else {
            script
        };
        sampling.set(true);
        leptos::task::spawn_local(async move {
            if let Some(path) = studio.sample_voice(voice.as_deref(), &text).await {
                play_sample(&path, studio);
            }
            sampling.set(false);
        });
    };

    view! {
        <div class="flex flex-col gap-2">
            <label class="text-sm text-neutral-400" for="voice-select">"Voice"</label>
            <div class="flex gap-3">
                <select
                    id="voice-select"
                    class="flex-1 px-3 py-2 rounded-lg bg-neutral-900 border border-neutral-700"
                    prop:value=selected
                    on:change=move |ev| state.select_voice(event_target_value(&ev))
                >
                    {move || {
                        groups
                            .get()
                            .into_iter()
                            .map(|(lang, voices)| {
                                view! {
                                    <optgroup label=lang>
                                        {voices
                                            .into_iter()
                                            .map(|voice| {
                                                let label = voice_label(&voice);
                                                view! { <option value=voice.id>{label}</option> }
                                            })
                                            .collect_view()}
                                    </optgroup>
                                }
                            })
                            .collect_view()
                    }}
                </select>
                <button
                    class="flex items-center gap-2 px-4 py-2 rounded-lg border border-neutral-700 hover:border-neutral-500 disabled:opacity-50"
                    disabled=move || sampling.get()
                    on:click=on_test
                >
                    <Icon icon=icondata::AiSoundOutlined attr:class="text-lg" />
                    "Test Voice"
                </button>
            </div>
        </div>
    }
}
