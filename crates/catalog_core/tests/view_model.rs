use std::collections::HashSet;

use catalog_core::{
    update, BrowseSession, Character, CharacterDetailView, Effect, Msg, ResourceItem,
    ResourceList, ViewMode,
};
use pretty_assertions::assert_eq;

fn resources(names: &[&str]) -> ResourceList {
    ResourceList {
        available_count: names.len() as i64 + 5,
        items: names
            .iter()
            .map(|name| ResourceItem {
                name: name.to_string(),
            })
            .collect(),
    }
}

fn wolverine() -> Character {
    Character {
        id: 1009718,
        name: "Wolverine".to_string(),
        series_available_count: 12,
        image_path: "http://i.annihil.us/u/prod/marvel/i/mg/2/60/537bcaef0f6cf".to_string(),
        image_extension: "jpg".to_string(),
        comics: resources(&["X-Men (1991) #1", "Wolverine (1988) #1"]),
        events: resources(&["Age of Apocalypse"]),
        stories: resources(&[]),
    }
}

#[test]
fn rows_carry_favorite_state_per_character() {
    let (session, effects) = update(BrowseSession::new(), Msg::Started);
    let request_id = match effects.as_slice() {
        [Effect::FetchPage { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let mut other = wolverine();
    other.id = 7;
    other.name = "Cyclops".to_string();
    let (session, _) = update(
        session,
        Msg::FetchSucceeded {
            request_id,
            characters: vec![wolverine(), other],
        },
    );

    let favorites: HashSet<i64> = [1009718].into_iter().collect();
    let view = session.view(&favorites);

    assert_eq!(view.view_mode, ViewMode::List);
    assert_eq!(view.page_size, 10);
    assert!(!view.busy);
    assert!(!view.prev_enabled);
    assert!(!view.next_enabled);
    let flags: Vec<_> = view
        .rows
        .iter()
        .map(|row| (row.name.as_str(), row.is_favorite))
        .collect();
    assert_eq!(flags, vec![("Cyclops", false), ("Wolverine", true)]);
    assert!(view.rows[1].image_url.starts_with("https://"));
}

#[test]
fn busy_flag_is_exposed_while_fetching() {
    let (session, _) = update(BrowseSession::new(), Msg::Started);
    assert!(session.view(&HashSet::<i64>::new()).busy);
}

#[test]
fn detail_view_lists_related_resources() {
    let favorites: HashSet<i64> = HashSet::new();
    let detail = CharacterDetailView::new(&wolverine(), &favorites);

    assert_eq!(detail.name, "Wolverine");
    assert_eq!(detail.series_count, 12);
    assert_eq!(
        detail.image_url,
        "https://i.annihil.us/u/prod/marvel/i/mg/2/60/537bcaef0f6cf.jpg"
    );
    assert_eq!(detail.comics, vec!["X-Men (1991) #1", "Wolverine (1988) #1"]);
    assert_eq!(detail.events, vec!["Age of Apocalypse"]);
    assert!(detail.stories.is_empty());
    assert!(!detail.is_favorite);
}
