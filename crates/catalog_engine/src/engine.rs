use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use catalog_core::{Character, RequestId};
use catalog_logging::{catalog_debug, catalog_error, catalog_warn};

use crate::{CatalogClient, CatalogError, EngineEvent};

enum EngineCommand {
    Fetch { request_id: RequestId, endpoint: String },
}

/// Runs a [`CatalogClient`] on a background runtime.
///
/// Completions arrive on the handle's channel, to be drained by the thread
/// that owns the browse session. Superseded requests are dropped silently.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(client: Arc<CatalogClient>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("catalog-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Fetch {
                            request_id,
                            endpoint,
                        } => {
                            // Claim the slot here, in command order, before the task is scheduled.
                            let ticket = client.begin();
                            let client = client.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let result = client.complete(ticket, &endpoint).await;
                                deliver(request_id, result, &event_tx);
                            });
                        }
                    }
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Queues a fetch. Fails only when the engine thread has exited.
    pub fn fetch(
        &self,
        request_id: RequestId,
        endpoint: impl Into<String>,
    ) -> Result<(), CatalogError> {
        self.cmd_tx
            .send(EngineCommand::Fetch {
                request_id,
                endpoint: endpoint.into(),
            })
            .map_err(|_| {
                catalog_error!("Engine stopped; request_id={} not sent", request_id);
                CatalogError::EngineStopped
            })
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn deliver(
    request_id: RequestId,
    result: Result<Vec<Character>, CatalogError>,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match &result {
        Err(err) if err.is_cancelled() => {
            catalog_debug!("Dropping superseded request_id={}", request_id);
            return;
        }
        Err(err) => catalog_warn!("Fetch request_id={} failed: {}", request_id, err),
        Ok(characters) => catalog_debug!(
            "Fetch request_id={} returned {} characters",
            request_id,
            characters.len()
        ),
    }
    let _ = event_tx.send(EngineEvent::FetchCompleted { request_id, result });
}
