//! Gallery core: pure session state machine, pagination rules and view-model helpers.
mod effect;
mod filter;
mod lightbox;
mod msg;
mod pagination;
mod scroll;
mod session;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use filter::{ExtensionFilter, ImageExtension};
pub use lightbox::{slides, Direction, Key, Lightbox, Slide, SLIDE_HEIGHT, SLIDE_WIDTH};
pub use msg::Msg;
pub use pagination::{extract_page_number, rewrite_for_page};
pub use scroll::{ScrollTrigger, SentinelKey};
pub use session::{
    ErrorCategory, ExtractionRequest, GallerySession, GrowthRequest, Phase, RequestId,
    SessionError, SessionMode, DEFAULT_WINDOW_SIZE, MAX_IMAGES_PER_PAGE,
};
pub use state::AppState;
pub use update::update;
pub use view_model::{FilterToggleView, GalleryViewModel, LightboxView};
