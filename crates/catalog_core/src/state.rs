use crate::view_model::{BrowseViewModel, CharacterRowView, FavoriteLookup};
use crate::{Character, CharacterId, Effect, PageRequest};

/// Identifies one issued fetch. Responses carrying any other id are stale.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
}

impl SortOrder {
    /// Stable, case-sensitive ordering by name.
    pub fn apply(self, characters: &mut [Character]) {
        match self {
            SortOrder::NameAsc => characters.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::NameDesc => characters.sort_by(|a, b| b.name.cmp(&a.name)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    pub const fn page_size(self) -> u32 {
        match self {
            ViewMode::List => 10,
            ViewMode::Grid => 20,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingFetch {
    request_id: RequestId,
    /// Cursor to fall back to if this fetch fails.
    restore_page_index: u32,
    restore_query: Option<String>,
}

/// Browse state owned by the presentation thread.
///
/// Holds the pagination cursor, the active query and sort order, and the page
/// currently on screen. All mutation goes through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowseSession {
    page_index: u32,
    query: Option<String>,
    sort_order: SortOrder,
    view_mode: ViewMode,
    characters: Vec<Character>,
    last_fetch_count: Option<usize>,
    pending: Option<PendingFetch>,
    last_request_id: RequestId,
    dirty: bool,
}

impl BrowseSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.view_mode.page_size()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|character| character.id == id)
    }

    /// True while a fetch issued by this session has not completed.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn prev_enabled(&self) -> bool {
        self.page_index > 0
    }

    /// A full page suggests more may follow; the API total is not consulted.
    pub fn next_enabled(&self) -> bool {
        self.last_fetch_count
            .is_some_and(|count| count >= self.page_size() as usize)
    }

    pub fn view(&self, favorites: &dyn FavoriteLookup) -> BrowseViewModel {
        BrowseViewModel {
            rows: self
                .characters
                .iter()
                .map(|character| CharacterRowView {
                    id: character.id,
                    name: character.name.clone(),
                    series_count: character.series_available_count,
                    image_url: character.image_url(),
                    is_favorite: favorites.is_favorite(character.id),
                })
                .collect(),
            view_mode: self.view_mode,
            page_index: self.page_index,
            page_size: self.page_size(),
            query: self.query.clone(),
            sort_order: self.sort_order,
            busy: self.is_busy(),
            prev_enabled: self.prev_enabled(),
            next_enabled: self.next_enabled(),
        }
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Issues a replace fetch for the current cursor. Callers check [`Self::is_busy`] first.
    pub(crate) fn begin_fetch(
        &mut self,
        restore_page_index: u32,
        restore_query: Option<String>,
    ) -> Effect {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.pending = Some(PendingFetch {
            request_id,
            restore_page_index,
            restore_query,
        });
        self.mark_dirty();
        Effect::FetchPage {
            request_id,
            page: PageRequest {
                page_index: self.page_index,
                page_size: self.page_size(),
                query: self.query.clone(),
            },
        }
    }

    fn take_pending(&mut self, request_id: RequestId) -> Option<PendingFetch> {
        match &self.pending {
            Some(pending) if pending.request_id == request_id => self.pending.take(),
            _ => None,
        }
    }

    /// Returns `true` when `query` differs from the active one and was applied.
    pub(crate) fn set_query(&mut self, query: Option<String>) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        self.page_index = 0;
        self.characters.clear();
        self.last_fetch_count = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn advance_page(&mut self) -> Option<u32> {
        let previous = self.page_index;
        self.page_index = previous.checked_add(1)?;
        Some(previous)
    }

    pub(crate) fn retreat_page(&mut self) -> Option<u32> {
        let previous = self.page_index;
        self.page_index = previous.checked_sub(1)?;
        Some(previous)
    }

    pub(crate) fn apply_page(
        &mut self,
        request_id: RequestId,
        mut characters: Vec<Character>,
    ) -> bool {
        if self.take_pending(request_id).is_none() {
            return false;
        }
        self.sort_order.apply(&mut characters);
        self.last_fetch_count = Some(characters.len());
        self.characters = characters;
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_failure(&mut self, request_id: RequestId) -> bool {
        let Some(pending) = self.take_pending(request_id) else {
            return false;
        };
        self.page_index = pending.restore_page_index;
        // A failed search falls back to the previous query so the same text can be resubmitted.
        self.query = pending.restore_query;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
        order.apply(&mut self.characters);
        self.mark_dirty();
    }

    pub(crate) fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggled();
        self.mark_dirty();
    }
}
