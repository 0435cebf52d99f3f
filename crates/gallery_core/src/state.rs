use crate::lightbox::Lightbox;
use crate::scroll::{ScrollTrigger, SentinelKey};
use crate::session::{GallerySession, GrowthRequest, SessionMode};
use crate::view_model::{FilterToggleView, GalleryViewModel, LightboxView};

/// Everything the presentation layer needs: the session plus the controllers
/// that sit on top of its filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    session: GallerySession,
    trigger: ScrollTrigger,
    lightbox: Lightbox,
    dirty: bool,
}

impl AppState {
    pub fn new(mode: SessionMode) -> Self {
        Self {
            session: GallerySession::new(mode),
            ..Self::default()
        }
    }

    pub fn session(&self) -> &GallerySession {
        &self.session
    }

    pub fn trigger(&self) -> &ScrollTrigger {
        &self.trigger
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn view(&self) -> GalleryViewModel {
        let images = self.session.filtered_view();
        let lightbox = self
            .lightbox
            .index()
            .zip(self.lightbox.current(&images))
            .map(|(index, src)| LightboxView {
                index,
                src: src.to_string(),
            });

        GalleryViewModel {
            mode: self.session.mode(),
            phase: self.session.phase(),
            input: self.input.clone(),
            target_url: self.session.target_url().map(ToOwned::to_owned),
            images: images.iter().map(|url| url.to_string()).collect(),
            revealed: self.session.revealed(),
            total: self.session.total(),
            current_page: self.session.current_remote_page(),
            has_more: self.session.has_more(),
            loading: self.session.is_loading(),
            error: self.session.last_error().map(|err| err.message.clone()),
            filter: self
                .session
                .filter()
                .entries()
                .map(|(extension, included)| FilterToggleView {
                    extension,
                    included,
                })
                .collect(),
            lightbox,
            sentinel: SentinelKey::for_session(&self.session),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub(crate) fn session_mut(&mut self) -> &mut GallerySession {
        &mut self.session
    }

    pub(crate) fn trigger_mut(&mut self) -> &mut ScrollTrigger {
        &mut self.trigger
    }

    pub(crate) fn fire_trigger(&mut self) -> Option<GrowthRequest> {
        self.trigger.on_visible(&self.session)
    }

    pub(crate) fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    pub(crate) fn filtered_len(&self) -> usize {
        self.session.filtered_view().len()
    }
}
