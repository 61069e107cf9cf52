use crate::{Character, CharacterId, RequestId};

/// Parameters of one page fetch, before authentication is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: u32,
    pub page_size: u32,
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a page and report back with `FetchSucceeded`/`FetchFailed` carrying `request_id`.
    FetchPage {
        request_id: RequestId,
        page: PageRequest,
    },
    ToggleFavorite { id: CharacterId },
    ShowDetail(Character),
}
