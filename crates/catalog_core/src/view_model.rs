use std::collections::HashSet;

use crate::{Character, CharacterId, ResourceList, SortOrder, ViewMode};

/// Read access to favorite membership, queried per rendered character.
pub trait FavoriteLookup {
    fn is_favorite(&self, id: CharacterId) -> bool;
}

impl FavoriteLookup for HashSet<CharacterId> {
    fn is_favorite(&self, id: CharacterId) -> bool {
        self.contains(&id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRowView {
    pub id: CharacterId,
    pub name: String,
    pub series_count: i64,
    pub image_url: String,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowseViewModel {
    pub rows: Vec<CharacterRowView>,
    pub view_mode: ViewMode,
    pub page_index: u32,
    pub page_size: u32,
    pub query: Option<String>,
    pub sort_order: SortOrder,
    pub busy: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDetailView {
    pub id: CharacterId,
    pub name: String,
    pub series_count: i64,
    pub image_url: String,
    pub comics: Vec<String>,
    pub events: Vec<String>,
    pub stories: Vec<String>,
    pub is_favorite: bool,
}

impl CharacterDetailView {
    pub fn new(character: &Character, favorites: &dyn FavoriteLookup) -> Self {
        let names = |list: &ResourceList| -> Vec<String> {
            list.names().map(str::to_owned).collect()
        };
        Self {
            id: character.id,
            name: character.name.clone(),
            series_count: character.series_available_count,
            image_url: character.image_url(),
            comics: names(&character.comics),
            events: names(&character.events),
            stories: names(&character.stories),
            is_favorite: favorites.is_favorite(character.id),
        }
    }
}
