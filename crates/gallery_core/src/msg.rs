use crate::filter::ImageExtension;
use crate::lightbox::{Direction, Key};
use crate::scroll::SentinelKey;
use crate::session::{RequestId, SessionError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input for scanning.
    UrlSubmitted,
    /// The list rendered and the sentinel is attached to `key`.
    SentinelRendered(SentinelKey),
    /// The sentinel crossed into the viewport.
    SentinelVisible,
    /// User toggled an extension checkbox.
    FilterToggled {
        extension: ImageExtension,
        included: bool,
    },
    /// Extraction service completion for a request.
    ExtractionCompleted {
        request_id: RequestId,
        result: Result<Vec<String>, SessionError>,
    },
    /// User clicked the image at this filtered position.
    LightboxOpened(usize),
    /// The lightbox widget moved to another slide.
    LightboxIndexChanged(usize),
    /// The lightbox widget was dismissed.
    LightboxClosed,
    LightboxStepped(Direction),
    KeyPressed(Key),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
