//! Sentinel-driven growth: turns "the end of the list became visible" into at
//! most one growth request per rendered list.

use crate::session::{GallerySession, GrowthRequest};

/// Identifies the element the sentinel is attached to.
///
/// The key changes whenever new content renders (more images revealed or
/// fetched), so a stale visibility event cannot re-trigger growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SentinelKey {
    /// Index in the accumulated list of the last filtered image, if any.
    pub last_index: Option<usize>,
    pub revealed: usize,
    pub total: usize,
}

impl SentinelKey {
    pub fn for_session(session: &GallerySession) -> Self {
        Self {
            last_index: session.last_filtered_index(),
            revealed: session.revealed(),
            total: session.total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrollTrigger {
    observed: Option<SentinelKey>,
    armed: bool,
}

impl ScrollTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the sentinel to `key`. Re-arms only when the key differs from
    /// the one already observed; returns whether it re-armed.
    pub fn observe(&mut self, key: SentinelKey) -> bool {
        if self.observed == Some(key) {
            return false;
        }
        self.observed = Some(key);
        self.armed = true;
        true
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn observed(&self) -> Option<SentinelKey> {
        self.observed
    }

    /// Handles the sentinel crossing into the viewport.
    ///
    /// Fires at most once per arming, and only when the session can grow.
    /// An event that cannot fire leaves the trigger armed.
    pub fn on_visible(&mut self, session: &GallerySession) -> Option<GrowthRequest> {
        if !self.armed {
            return None;
        }
        let growth = session.growth()?;
        self.armed = false;
        Some(growth)
    }
}
