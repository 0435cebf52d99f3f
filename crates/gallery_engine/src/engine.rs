use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crate::extract::ImageExtractor;
use crate::fetch::{FetchSettings, Fetcher};
use crate::service::ExtractionService;
use crate::{EngineEvent, RequestId};

enum EngineCommand {
    Extract { request_id: RequestId, url: String },
}

/// Runs extraction requests on a background tokio runtime and reports
/// completions over a channel, so synchronous callers never block on IO.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> io::Result<Self> {
        Self::with_service(ExtractionService::new(settings))
    }

    pub fn with_service<F, E>(service: ExtractionService<F, E>) -> io::Result<Self>
    where
        F: Fetcher + 'static,
        E: ImageExtractor + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let service = Arc::new(service);

        thread::Builder::new()
            .name("gallery-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let service = service.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(service.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn extract(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Extract {
            request_id,
            url: url.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command<F, E>(
    service: &ExtractionService<F, E>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) where
    F: Fetcher,
    E: ImageExtractor + 'static,
{
    match command {
        EngineCommand::Extract { request_id, url } => {
            let result = service.extract_images(Some(&url)).await;
            let _ = event_tx.send(EngineEvent::ExtractionCompleted { request_id, result });
        }
    }
}
