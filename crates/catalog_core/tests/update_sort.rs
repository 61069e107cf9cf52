use catalog_core::{update, BrowseSession, Character, Effect, Msg, ResourceList, SortOrder};

fn character(id: i64, name: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        series_available_count: 1,
        image_path: "https://img.example.com/c".to_string(),
        image_extension: "png".to_string(),
        comics: ResourceList::default(),
        events: ResourceList::default(),
        stories: ResourceList::default(),
    }
}

fn names(session: &BrowseSession) -> Vec<&str> {
    session.characters().iter().map(|c| c.name.as_str()).collect()
}

fn loaded(characters: Vec<Character>) -> BrowseSession {
    let (session, effects) = update(BrowseSession::new(), Msg::Started);
    let request_id = match effects.as_slice() {
        [Effect::FetchPage { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let (session, _) = update(
        session,
        Msg::FetchSucceeded {
            request_id,
            characters,
        },
    );
    session
}

#[test]
fn sort_reorders_held_page_without_fetching() {
    let session = loaded(vec![character(1, "Zeta"), character(2, "Alpha")]);

    let (session, effects) = update(session, Msg::SortChanged(SortOrder::NameAsc));
    assert!(effects.is_empty());
    assert_eq!(names(&session), vec!["Alpha", "Zeta"]);

    let (session, effects) = update(session, Msg::SortChanged(SortOrder::NameDesc));
    assert!(effects.is_empty());
    assert_eq!(names(&session), vec!["Zeta", "Alpha"]);
    assert!(!session.is_busy());
}

#[test]
fn sort_is_case_sensitive() {
    let session = loaded(vec![
        character(1, "beta"),
        character(2, "Beta"),
        character(3, "alpha"),
    ]);

    let (session, _) = update(session, Msg::SortChanged(SortOrder::NameAsc));
    assert_eq!(names(&session), vec!["Beta", "alpha", "beta"]);
}

#[test]
fn active_sort_applies_to_later_pages() {
    let session = loaded(vec![character(1, "Alpha")]);
    let (session, _) = update(session, Msg::SortChanged(SortOrder::NameDesc));

    let (session, effects) = update(session, Msg::SearchSubmitted("a".into()));
    let request_id = match effects.as_slice() {
        [Effect::FetchPage { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let (session, _) = update(
        session,
        Msg::FetchSucceeded {
            request_id,
            characters: vec![character(4, "Abyss"), character(5, "Agatha")],
        },
    );
    assert_eq!(names(&session), vec!["Agatha", "Abyss"]);
}
