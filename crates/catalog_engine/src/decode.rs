use catalog_core::{Character, ResourceItem, ResourceList};
use serde::Deserialize;

use crate::CatalogError;

#[derive(Debug, Deserialize)]
struct CharacterResponse {
    data: CharacterData,
}

#[derive(Debug, Deserialize)]
struct CharacterData {
    results: Vec<WireCharacter>,
}

#[derive(Debug, Deserialize)]
struct WireCharacter {
    id: i64,
    name: String,
    series: WireSeries,
    thumbnail: WireThumbnail,
    comics: WireResourceList,
    events: WireResourceList,
    stories: WireResourceList,
}

#[derive(Debug, Deserialize)]
struct WireSeries {
    available: i64,
}

#[derive(Debug, Deserialize)]
struct WireThumbnail {
    path: String,
    extension: String,
}

#[derive(Debug, Deserialize)]
struct WireResourceList {
    available: i64,
    items: Vec<WireResourceItem>,
}

#[derive(Debug, Deserialize)]
struct WireResourceItem {
    name: String,
}

impl From<WireResourceList> for ResourceList {
    fn from(list: WireResourceList) -> Self {
        ResourceList {
            available_count: list.available,
            items: list
                .items
                .into_iter()
                .map(|item| ResourceItem { name: item.name })
                .collect(),
        }
    }
}

impl From<WireCharacter> for Character {
    fn from(wire: WireCharacter) -> Self {
        Character {
            id: wire.id,
            name: wire.name,
            series_available_count: wire.series.available,
            image_path: wire.thumbnail.path,
            image_extension: wire.thumbnail.extension,
            comics: wire.comics.into(),
            events: wire.events.into(),
            stories: wire.stories.into(),
        }
    }
}

/// Decode a `{"data": {"results": [...]}}` payload into characters.
///
/// An empty body is `EmptyPayload`; anything serde rejects is `Decode`.
/// Fields the API adds beyond the ones read here are ignored.
pub fn decode_characters(bytes: &[u8]) -> Result<Vec<Character>, CatalogError> {
    if bytes.is_empty() {
        return Err(CatalogError::EmptyPayload);
    }
    let response: CharacterResponse =
        serde_json::from_slice(bytes).map_err(|err| CatalogError::Decode(err.to_string()))?;
    Ok(response
        .data
        .results
        .into_iter()
        .map(Character::from)
        .collect())
}
