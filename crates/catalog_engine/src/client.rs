use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use catalog_core::Character;
use catalog_logging::catalog_debug;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::decode::decode_characters;
use crate::{CatalogError, TransportFailure};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Loads one page of characters from a fully signed endpoint.
#[async_trait::async_trait]
pub trait CharacterSource: Send + Sync {
    async fn load(&self, endpoint: &str) -> Result<Vec<Character>, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCharacterSource {
    http: reqwest::Client,
    settings: ClientSettings,
}

impl ReqwestCharacterSource {
    pub fn new(settings: ClientSettings) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(map_reqwest_error)?;
        Ok(Self { http, settings })
    }
}

#[async_trait::async_trait]
impl CharacterSource for ReqwestCharacterSource {
    async fn load(&self, endpoint: &str) -> Result<Vec<Character>, CatalogError> {
        let url = reqwest::Url::parse(endpoint)
            .map_err(|err| CatalogError::InvalidEndpoint(err.to_string()))?;

        let response = self.http.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Transport(TransportFailure::HttpStatus(
                status.as_u16(),
            )));
        }

        let max_bytes = self.settings.max_bytes;
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(CatalogError::Transport(TransportFailure::TooLarge { max_bytes }));
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(CatalogError::Transport(TransportFailure::TooLarge { max_bytes }));
            }
            bytes.extend_from_slice(&chunk);
        }

        decode_characters(&bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        return CatalogError::Transport(TransportFailure::Timeout);
    }
    CatalogError::Transport(TransportFailure::Network(err.to_string()))
}

/// Permission to run one request. Obtained from [`CatalogClient::begin`].
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    cancel: CancellationToken,
}

impl FetchTicket {
    pub fn is_superseded(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug)]
struct Inflight {
    generation: u64,
    cancel: CancellationToken,
}

#[derive(Debug, Default)]
struct InflightSlot {
    current: Option<Inflight>,
    last_generation: u64,
}

/// Last-request-wins front for a [`CharacterSource`].
///
/// At most one request is live per client. Starting a request cancels the
/// previous one, whose caller then gets `CatalogError::Cancelled` even if its
/// response had already arrived.
pub struct CatalogClient {
    source: Arc<dyn CharacterSource>,
    slot: Mutex<InflightSlot>,
}

impl CatalogClient {
    pub fn new(source: Arc<dyn CharacterSource>) -> Self {
        Self {
            source,
            slot: Mutex::new(InflightSlot::default()),
        }
    }

    pub fn with_settings(settings: ClientSettings) -> Result<Self, CatalogError> {
        Ok(Self::new(Arc::new(ReqwestCharacterSource::new(settings)?)))
    }

    pub fn is_idle(&self) -> bool {
        self.lock_slot().current.is_none()
    }

    /// Claims the in-flight slot, cancelling whatever held it.
    /// The most recent call to `begin` wins, regardless of task scheduling.
    pub fn begin(&self) -> FetchTicket {
        let mut slot = self.lock_slot();
        slot.last_generation += 1;
        let generation = slot.last_generation;
        let cancel = CancellationToken::new();
        if let Some(previous) = slot.current.replace(Inflight {
            generation,
            cancel: cancel.clone(),
        }) {
            catalog_debug!(
                "Superseding request generation={} with generation={}",
                previous.generation,
                generation
            );
            previous.cancel.cancel();
        }
        FetchTicket { generation, cancel }
    }

    pub async fn complete(
        &self,
        ticket: FetchTicket,
        endpoint: &str,
    ) -> Result<Vec<Character>, CatalogError> {
        let _release = SlotRelease {
            client: self,
            generation: ticket.generation,
        };

        let result = tokio::select! {
            biased;
            _ = ticket.cancel.cancelled() => Err(CatalogError::Cancelled),
            result = self.source.load(endpoint) => result,
        };

        if ticket.is_superseded() {
            return Err(CatalogError::Cancelled);
        }
        result
    }

    pub async fn fetch(&self, endpoint: &str) -> Result<Vec<Character>, CatalogError> {
        let ticket = self.begin();
        self.complete(ticket, endpoint).await
    }

    fn lock_slot(&self) -> MutexGuard<'_, InflightSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the client to idle when the owning request ends, including when
/// its future is dropped early.
struct SlotRelease<'a> {
    client: &'a CatalogClient,
    generation: u64,
}

impl Drop for SlotRelease<'_> {
    fn drop(&mut self) {
        let mut slot = self.client.lock_slot();
        if slot
            .current
            .as_ref()
            .is_some_and(|inflight| inflight.generation == self.generation)
        {
            slot.current = None;
        }
    }
}
