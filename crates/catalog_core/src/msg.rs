#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Presentation layer is ready; load the first page.
    Started,
    /// User submitted the search box. Empty text clears the search.
    SearchSubmitted(String),
    /// User clicked Next.
    NextPageClicked,
    /// User clicked Previous.
    PrevPageClicked,
    /// User picked a sort order.
    SortChanged(crate::SortOrder),
    /// User switched between list and grid layout.
    ViewModeToggled,
    /// User selected a character from the page.
    CharacterSelected { id: crate::CharacterId },
    /// User tapped the favorite control for a character.
    FavoriteToggleRequested { id: crate::CharacterId },
    /// Favorites store applied a toggle.
    FavoriteChanged {
        id: crate::CharacterId,
        is_favorite: bool,
    },
    /// Engine delivered a page.
    FetchSucceeded {
        request_id: crate::RequestId,
        characters: Vec<crate::Character>,
    },
    /// Engine reported a failed fetch.
    FetchFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
