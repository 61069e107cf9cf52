use std::fmt;

use catalog_core::{Character, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A fetch finished. Superseded fetches never produce this event.
    FetchCompleted {
        request_id: RequestId,
        result: Result<Vec<Character>, CatalogError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64 },
    Network(String),
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::HttpStatus(code) => write!(f, "http status {code}"),
            TransportFailure::Timeout => write!(f, "timeout"),
            TransportFailure::TooLarge { max_bytes } => {
                write!(f, "response larger than {max_bytes} bytes")
            }
            TransportFailure::Network(message) => write!(f, "network error: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("transport failure: {0}")]
    Transport(TransportFailure),
    #[error("response had no body")]
    EmptyPayload,
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// Superseded by a newer request. Dropped before reaching the session.
    #[error("request superseded")]
    Cancelled,
    #[error("engine thread is no longer running")]
    EngineStopped,
}

impl CatalogError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Cancelled)
    }
}
