//! Thin wrappers over the few DOM calls the result and voice views need.

#[cfg(feature = "hydrate")]
mod imp {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlAnchorElement, HtmlAudioElement};

    fn js_err(e: wasm_bindgen::JsValue) -> String {
        e.as_string().unwrap_or_else(|| format!("{e:?}"))
    }

    pub fn save_file(href: &str, file_name: &str) -> Result<(), String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let body = document.body().ok_or("no body")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| "not an anchor".to_string())?;
        anchor.set_href(href);
        anchor.set_download(file_name);
        anchor.style().set_property("display", "none").map_err(js_err)?;
        body.append_child(&anchor).map_err(js_err)?;
        anchor.click();
        body.remove_child(&anchor).map_err(js_err)?;
        Ok(())
    }

    pub fn open_in_new_tab(href: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.open_with_url_and_target(href, "_blank") {
                leptos::logging::error!("Failed to open {href}: {}", js_err(e));
            }
        }
    }

    /// A playing sample. Failures after [`Playback::stop`] are not reported.
    pub struct Playback {
        audio: HtmlAudioElement,
        silenced: Rc<Cell<bool>>,
    }

    impl Playback {
        pub fn stop(&self) {
            self.silenced.set(true);
            self.audio.set_onerror(None);
            let _ = self.audio.pause();
            self.audio.remove_attribute("src").ok();
            self.audio.load();
        }
    }

    /// Start playing `src`. A rejected play promise or a media error is
    /// passed to `on_error` once.
    pub fn play_audio(src: &str, on_error: Rc<dyn Fn(String)>) -> Result<Playback, String> {
        let audio = HtmlAudioElement::new_with_src(src).map_err(js_err)?;
        let silenced = Rc::new(Cell::new(false));
        let report = {
            let silenced = silenced.clone();
            Rc::new(move |reason: String| {
                if !silenced.replace(true) {
                    on_error(reason);
                }
            })
        };

        let onerror = {
            let report = report.clone();
            Closure::once_into_js(move |_: web_sys::Event| {
                report("audio failed to load".to_string())
            })
        };
        audio.set_onerror(Some(onerror.unchecked_ref()));

        let promise = audio.play().map_err(js_err)?;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                report(js_err(e));
            }
        });
        Ok(Playback { audio, silenced })
    }

    pub fn set_body_class(class: &str, enabled: bool) {
        let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        else {
            return;
        };
        let _ = body.class_list().toggle_with_force(class, enabled);
    }
}

#[cfg(not(feature = "hydrate"))]
mod imp {
    pub fn save_file(_href: &str, _file_name: &str) -> Result<(), String> {
        Err("downloads need a browser".to_string())
    }

    pub fn open_in_new_tab(_href: &str) {}

    pub fn set_body_class(_class: &str, _enabled: bool) {}
}

pub use imp::*;

pub fn now_ms() -> u128 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
