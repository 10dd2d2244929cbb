use gloo_timers::callback::Timeout;
use shared::preview::{PlaybackError, PreviewBackend, PreviewSignal, PreviewTicket};
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;
use yew::Callback;

/// Plays preview clips through an `<audio>` element.
///
/// Completion, failure and the fallback timeout are reported through `signals`; the
/// owning component routes them back into the form controller.
pub struct WebPreview {
    audio: Option<HtmlAudioElement>,
    // Must outlive the element's `onended` registration.
    on_ended: Option<Closure<dyn FnMut()>>,
    signals: Callback<PreviewSignal>,
}

impl WebPreview {
    pub fn new(signals: Callback<PreviewSignal>) -> Self {
        Self {
            audio: None,
            on_ended: None,
            signals,
        }
    }
}

impl PreviewBackend for WebPreview {
    type Timer = Timeout;

    fn stop(&mut self) {
        if let Some(audio) = self.audio.take() {
            audio.set_onended(None);
            let _ = audio.pause();
            audio.set_current_time(0.0);
        }
        self.on_ended = None;
    }

    fn play(&mut self, url: &str, ticket: PreviewTicket) -> Result<(), PlaybackError> {
        let audio =
            HtmlAudioElement::new_with_src(url).map_err(|e| PlaybackError(format!("{:?}", e)))?;

        let signals = self.signals.clone();
        let on_ended =
            Closure::<dyn FnMut()>::new(move || signals.emit(PreviewSignal::Ended(ticket)));
        audio.set_onended(Some(on_ended.as_ref().unchecked_ref()));

        let promise = audio
            .play()
            .map_err(|e| PlaybackError(format!("{:?}", e)))?;
        let signals = self.signals.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                tracing::error!("Error playing audio: {:?}", e);
                signals.emit(PreviewSignal::Failed(ticket));
            }
        });

        self.audio = Some(audio);
        self.on_ended = Some(on_ended);
        Ok(())
    }

    fn start_timer(&mut self, after: Duration, ticket: PreviewTicket) -> Timeout {
        let signals = self.signals.clone();
        Timeout::new(after.as_millis() as u32, move || {
            signals.emit(PreviewSignal::TimedOut(ticket))
        })
    }
}
