use crate::filter::ImageExtension;
use crate::scroll::SentinelKey;
use crate::session::{Phase, SessionMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterToggleView {
    pub extension: ImageExtension,
    pub included: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxView {
    pub index: usize,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryViewModel {
    pub mode: SessionMode,
    pub phase: Phase,
    pub input: String,
    pub target_url: Option<String>,
    /// Revealed images admitted by the filter, in discovery order.
    pub images: Vec<String>,
    pub revealed: usize,
    pub total: usize,
    pub current_page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: Vec<FilterToggleView>,
    pub lightbox: Option<LightboxView>,
    pub sentinel: SentinelKey,
    pub dirty: bool,
}

impl GalleryViewModel {
    pub fn status_line(&self) -> String {
        format!("Showing {} of {} images", self.revealed, self.total)
    }
}
