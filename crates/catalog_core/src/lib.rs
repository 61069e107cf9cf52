//! Catalog core: data model, pure browse state machine and view-model helpers.
mod character;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use character::{Character, CharacterId, ResourceItem, ResourceList};
pub use effect::{Effect, PageRequest};
pub use msg::Msg;
pub use state::{BrowseSession, RequestId, SortOrder, ViewMode};
pub use update::update;
pub use view_model::{BrowseViewModel, CharacterDetailView, CharacterRowView, FavoriteLookup};
