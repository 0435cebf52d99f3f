use gallery_logging::gallery_debug;

use crate::session::{ExtractionRequest, GrowthRequest};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::UrlSubmitted => {
            if state.session().is_loading() {
                return (state, Vec::new());
            }
            let input = state.input().to_string();
            let request = state.session_mut().submit(&input);
            if request.is_some() {
                state.lightbox_mut().close();
            }
            state.mark_dirty();
            request.map(extract_effect).into_iter().collect()
        }
        Msg::SentinelRendered(key) => {
            state.trigger_mut().observe(key);
            Vec::new()
        }
        Msg::SentinelVisible => {
            match state.fire_trigger() {
                Some(GrowthRequest::RevealMore) => {
                    if state.session_mut().reveal_more() {
                        state.mark_dirty();
                    }
                    Vec::new()
                }
                Some(GrowthRequest::FetchNextPage) => {
                    let request = state.session_mut().fetch_next_page();
                    state.mark_dirty();
                    request.map(extract_effect).into_iter().collect()
                }
                None => Vec::new(),
            }
        }
        Msg::FilterToggled {
            extension,
            included,
        } => {
            state.session_mut().set_filter(extension, included);
            let len = state.filtered_len();
            state.lightbox_mut().reconcile(len);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ExtractionCompleted { request_id, result } => {
            if state.session_mut().apply_extraction(request_id, result) {
                let len = state.filtered_len();
                state.lightbox_mut().reconcile(len);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LightboxOpened(index) => {
            let len = state.filtered_len();
            if state.lightbox_mut().open(index, len) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LightboxIndexChanged(index) => {
            let len = state.filtered_len();
            if state.lightbox_mut().jump(index, len) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LightboxClosed => {
            if state.lightbox().is_open() {
                state.lightbox_mut().close();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LightboxStepped(direction) => {
            let len = state.filtered_len();
            if state.lightbox_mut().step(direction, len) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::KeyPressed(key) => {
            let len = state.filtered_len();
            if state.lightbox_mut().handle_key(key, len) {
                state.mark_dirty();
            } else {
                gallery_debug!("Key {:?} ignored", key);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn extract_effect(request: ExtractionRequest) -> Effect {
    Effect::ExtractImages {
        request_id: request.request_id,
        url: request.url,
    }
}
