use gallery_logging::{gallery_debug, gallery_info, gallery_warn};

use crate::filter::{ExtensionFilter, ImageExtension};
use crate::pagination::{extract_page_number, rewrite_for_page};

pub type RequestId = u64;

/// Images revealed per step in local-window mode.
pub const DEFAULT_WINDOW_SIZE: usize = 20;
/// Upper bound on images accepted from a single extraction response.
pub const MAX_IMAGES_PER_PAGE: usize = 200;

/// How a session grows past its first response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Fetch the page once, then reveal it `window_size` images at a time.
    LocalWindow { window_size: usize },
    /// Reveal everything fetched; grow by fetching the next remote page.
    RemotePage,
}

impl SessionMode {
    pub fn local() -> Self {
        SessionMode::LocalWindow {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl Default for SessionMode {
    fn default() -> Self {
        Self::local()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or unusable target URL; nothing was fetched.
    Input,
    /// The target page could not be retrieved.
    Fetch,
    /// Retrieval worked but extraction broke.
    Extraction,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SessionError {
    pub category: ErrorCategory,
    pub message: String,
}

impl SessionError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Input, message)
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Fetch, message)
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Extraction, message)
    }
}

/// A request the session wants the extraction service to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub request_id: RequestId,
    pub url: String,
}

/// The kind of growth a session can currently perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthRequest {
    RevealMore,
    FetchNextPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingKind {
    Fresh { url: String, page: u32 },
    NextPage { page: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    request_id: RequestId,
    kind: PendingKind,
}

/// Client-side gallery state for one submitted target URL at a time.
///
/// `all_images` is replaced when a fresh submission succeeds and appended to
/// when a remote page arrives. At most one extraction request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySession {
    mode: SessionMode,
    phase: Phase,
    target_url: Option<String>,
    all_images: Vec<String>,
    reveal_count: usize,
    filter: ExtensionFilter,
    current_remote_page: u32,
    remote_has_more: bool,
    pages_fetched: usize,
    last_error: Option<SessionError>,
    pending: Option<Pending>,
    next_request_id: RequestId,
}

impl Default for GallerySession {
    fn default() -> Self {
        Self::new(SessionMode::default())
    }
}

impl GallerySession {
    pub fn new(mode: SessionMode) -> Self {
        let mode = match mode {
            SessionMode::LocalWindow { window_size } => SessionMode::LocalWindow {
                window_size: window_size.max(1),
            },
            SessionMode::RemotePage => SessionMode::RemotePage,
        };
        Self {
            mode,
            phase: Phase::Idle,
            target_url: None,
            all_images: Vec::new(),
            reveal_count: 0,
            filter: ExtensionFilter::default(),
            current_remote_page: 1,
            remote_has_more: false,
            pages_fetched: 0,
            last_error: None,
            pending: None,
            next_request_id: 1,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn target_url(&self) -> Option<&str> {
        self.target_url.as_deref()
    }

    pub fn all_images(&self) -> &[String] {
        &self.all_images
    }

    pub fn revealed(&self) -> usize {
        self.reveal_count
    }

    pub fn total(&self) -> usize {
        self.all_images.len()
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn current_remote_page(&self) -> u32 {
        self.current_remote_page
    }

    pub fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Whether anything remains to be shown, either locally or remotely.
    pub fn has_more(&self) -> bool {
        match self.mode {
            SessionMode::LocalWindow { .. } => self.reveal_count < self.all_images.len(),
            SessionMode::RemotePage => self.remote_has_more,
        }
    }

    /// The growth step available right now, if any.
    ///
    /// A failed session never reaches the network again until the next
    /// submission; revealing already loaded images stays possible.
    pub fn growth(&self) -> Option<GrowthRequest> {
        if self.is_loading() || !self.has_more() {
            return None;
        }
        match self.mode {
            SessionMode::LocalWindow { .. } => Some(GrowthRequest::RevealMore),
            SessionMode::RemotePage if self.phase == Phase::Failed => None,
            SessionMode::RemotePage => Some(GrowthRequest::FetchNextPage),
        }
    }

    pub fn can_grow(&self) -> bool {
        self.growth().is_some()
    }

    /// Starts a fresh run for `raw_url`.
    ///
    /// Returns `None` while a request is in flight, or when the input is blank
    /// (recorded as an input error). Previously loaded images stay in place
    /// until the new response succeeds.
    pub fn submit(&mut self, raw_url: &str) -> Option<ExtractionRequest> {
        if self.is_loading() {
            gallery_debug!("submit ignored: request already in flight");
            return None;
        }

        let url = raw_url.trim();
        if url.is_empty() {
            self.fail(SessionError::input("Please enter a URL to scan"));
            return None;
        }

        let page = extract_page_number(url);
        gallery_info!("Submitting {} (page {})", url, page);
        let kind = PendingKind::Fresh {
            url: url.to_string(),
            page,
        };
        Some(self.begin(kind, url.to_string()))
    }

    /// Grows the reveal window by one step. Local-window mode only.
    pub fn reveal_more(&mut self) -> bool {
        let SessionMode::LocalWindow { window_size } = self.mode else {
            return false;
        };
        if self.is_loading() || self.reveal_count >= self.all_images.len() {
            return false;
        }
        self.reveal_count = (self.reveal_count + window_size).min(self.all_images.len());
        gallery_debug!(
            "Revealed {} of {} images",
            self.reveal_count,
            self.all_images.len()
        );
        true
    }

    /// Requests the page after the current one. Remote-page mode only.
    pub fn fetch_next_page(&mut self) -> Option<ExtractionRequest> {
        if self.mode != SessionMode::RemotePage
            || self.phase != Phase::Ready
            || !self.remote_has_more
        {
            return None;
        }
        let target = self.target_url.as_deref()?;
        let page = self.current_remote_page.saturating_add(1);
        let url = rewrite_for_page(target, page);
        gallery_info!("Fetching page {} via {}", page, url);
        Some(self.begin(PendingKind::NextPage { page }, url))
    }

    /// Performs whichever growth step the mode allows.
    pub fn grow(&mut self) -> Option<ExtractionRequest> {
        match self.growth()? {
            GrowthRequest::RevealMore => {
                self.reveal_more();
                None
            }
            GrowthRequest::FetchNextPage => self.fetch_next_page(),
        }
    }

    pub fn set_filter(&mut self, extension: ImageExtension, included: bool) {
        self.filter.set(extension, included);
    }

    /// Revealed images admitted by the filter, in original order.
    pub fn filtered_view(&self) -> Vec<&str> {
        self.all_images[..self.reveal_count]
            .iter()
            .map(String::as_str)
            .filter(|url| self.filter.admits(url))
            .collect()
    }

    /// Index into `all_images` of the last filtered image, if any.
    pub fn last_filtered_index(&self) -> Option<usize> {
        self.all_images[..self.reveal_count]
            .iter()
            .rposition(|url| self.filter.admits(url))
    }

    /// Settles the in-flight request. Completions for any other request id
    /// are stale and ignored; returns whether the state changed.
    pub fn apply_extraction(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<String>, SessionError>,
    ) -> bool {
        let pending = match self.pending.take() {
            Some(pending) if pending.request_id == request_id => pending,
            other => {
                gallery_debug!("Ignoring stale extraction result {}", request_id);
                self.pending = other;
                return false;
            }
        };

        match (pending.kind, result) {
            (PendingKind::Fresh { url, page }, Ok(mut images)) => {
                images.truncate(MAX_IMAGES_PER_PAGE);
                self.reveal_count = match self.mode {
                    SessionMode::LocalWindow { window_size } => window_size.min(images.len()),
                    SessionMode::RemotePage => images.len(),
                };
                self.remote_has_more = !images.is_empty();
                self.all_images = images;
                self.target_url = Some(url);
                self.current_remote_page = page;
                self.pages_fetched = 1;
                self.settle_ready();
            }
            (PendingKind::NextPage { page }, Ok(mut images)) => {
                images.truncate(MAX_IMAGES_PER_PAGE);
                self.remote_has_more = !images.is_empty();
                if !self.remote_has_more {
                    gallery_info!("Page {} was empty; pagination finished", page);
                }
                self.all_images.append(&mut images);
                self.reveal_count = self.all_images.len();
                self.current_remote_page = page;
                self.pages_fetched += 1;
                self.settle_ready();
            }
            (PendingKind::Fresh { .. }, Err(err)) => {
                self.fail(err);
            }
            (PendingKind::NextPage { page }, Err(err)) => {
                gallery_warn!("Page {} failed; stopping pagination", page);
                self.remote_has_more = false;
                self.fail(err);
            }
        }
        true
    }

    fn begin(&mut self, kind: PendingKind, url: String) -> ExtractionRequest {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending = Some(Pending { request_id, kind });
        self.phase = Phase::Loading;
        ExtractionRequest { request_id, url }
    }

    fn settle_ready(&mut self) {
        self.phase = Phase::Ready;
        self.last_error = None;
    }

    fn fail(&mut self, err: SessionError) {
        gallery_warn!("Gallery request failed: {}", err);
        self.phase = Phase::Failed;
        self.last_error = Some(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://img.example.com/{i}.jpg")).collect()
    }

    #[test]
    fn window_size_of_zero_is_raised_to_one() {
        let session = GallerySession::new(SessionMode::LocalWindow { window_size: 0 });
        assert_eq!(session.mode(), SessionMode::LocalWindow { window_size: 1 });
    }

    #[test]
    fn request_ids_increase() {
        let mut session = GallerySession::new(SessionMode::local());
        let first = session.submit("https://a.example.com").unwrap();
        session.apply_extraction(first.request_id, Ok(images(1)));
        let second = session.submit("https://b.example.com").unwrap();
        assert!(second.request_id > first.request_id);
    }

    #[test]
    fn last_filtered_index_points_into_all_images() {
        let mut session = GallerySession::new(SessionMode::local());
        let req = session.submit("https://a.example.com").unwrap();
        session.apply_extraction(
            req.request_id,
            Ok(vec!["a.jpg".into(), "b.png".into(), "c.gif".into()]),
        );
        session.set_filter(ImageExtension::Gif, false);
        assert_eq!(session.last_filtered_index(), Some(1));
    }
}
