use std::io;
use std::time::Duration;

use gallery_core::{Effect, ErrorCategory, Msg, SessionError};
use gallery_engine::{EngineEvent, EngineHandle, ExtractionFailure, FailureCategory, FetchSettings};
use gallery_logging::gallery_info;

/// Turns core effects into engine requests and engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings) -> io::Result<Self> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ExtractImages { request_id, url } => {
                    gallery_info!("Request {}: extracting images from {}", request_id, url);
                    self.engine.extract(request_id, url);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine completion.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ExtractionCompleted { request_id, result } => Msg::ExtractionCompleted {
            request_id,
            result: result.map_err(|failure| map_failure(&failure)),
        },
    }
}

fn map_failure(failure: &ExtractionFailure) -> SessionError {
    let category = match failure.category() {
        FailureCategory::Input => ErrorCategory::Input,
        FailureCategory::Fetch => ErrorCategory::Fetch,
        FailureCategory::Extraction => ErrorCategory::Extraction,
    };
    SessionError::new(category, failure.to_string())
}
