use crate::audio;
use crate::constants::{AUDIO_TOGGLE_ICON_ID, AUDIO_TOGGLE_ID, ICON_MUTED, ICON_UNMUTED};
use crate::dom;
use crate::frame::SharedAudio;
use web_sys as web;

fn update_audio_icon(muted: bool) {
    if let Some(doc) = dom::window_document() {
        dom::set_element_class(
            &doc,
            AUDIO_TOGGLE_ICON_ID,
            if muted { ICON_MUTED } else { ICON_UNMUTED },
        );
    }
}

// Browsers gate audio behind a user gesture; build the graph on demand and
// leave it None (all audio becomes a no-op) when construction fails.
fn ensure_audio(audio: &SharedAudio, seed: u64) {
    let mut slot = audio.borrow_mut();
    if slot.is_none() {
        match audio::init_audio(seed) {
            Ok(state) => *slot = Some(state),
            Err(()) => log::warn!("[audio] staying silent: initialization failed"),
        }
    }
}

/// Wire the mute/unmute button: lazily initialize audio on first use, then
/// toggle the output stage and mirror the state onto the icon.
pub fn wire_audio_toggle(document: &web::Document, audio: SharedAudio, seed: u64) {
    update_audio_icon(true);
    let audio_btn = audio.clone();
    dom::add_click_listener(document, AUDIO_TOGGLE_ID, move || {
        ensure_audio(&audio_btn, seed);
        if let Some(state) = audio_btn.borrow_mut().as_mut() {
            let muted = !state.graph.is_muted();
            state.graph.set_muted(muted);
            state.engine.set_muted(muted);
            update_audio_icon(muted);
            log::info!("[audio] muted={}", muted);
        }
    });
}

/// First interaction anywhere on the page initializes the (still muted)
/// audio graph, so the drone is already evolving by the time it is unmuted.
pub fn wire_first_interaction(document: &web::Document, audio: SharedAudio, seed: u64) {
    dom::add_document_click_once(document, move || {
        ensure_audio(&audio, seed);
    });
}
