//! Catalog engine: upstream API access, response decoding and local persistence.
mod client;
mod decode;
mod engine;
mod favorites;
mod signer;
mod types;

pub use client::{
    CatalogClient, CharacterSource, ClientSettings, FetchTicket, ReqwestCharacterSource,
};
pub use decode::decode_characters;
pub use engine::EngineHandle;
pub use favorites::{FavoritesStore, FAVORITES_FILENAME, FAVORITES_KEY};
pub use signer::{ApiCredentials, RequestSigner, TimestampSource, DEFAULT_BASE_URL};
pub use types::{CatalogError, EngineEvent, TransportFailure};
