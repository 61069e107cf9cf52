use crate::{BrowseSession, Effect, Msg};

/// Pure update function: applies a message to the session and returns any effects.
pub fn update(mut session: BrowseSession, msg: Msg) -> (BrowseSession, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if session.is_busy() {
                Vec::new()
            } else {
                let restore = session.page_index();
                let query = session.query().map(str::to_string);
                vec![session.begin_fetch(restore, query)]
            }
        }
        Msg::SearchSubmitted(text) => {
            if session.is_busy() {
                return (session, Vec::new());
            }
            let previous = session.query().map(str::to_string);
            if session.set_query(normalize_query(&text)) {
                vec![session.begin_fetch(0, previous)]
            } else {
                Vec::new()
            }
        }
        Msg::NextPageClicked => {
            if session.is_busy() {
                return (session, Vec::new());
            }
            match session.advance_page() {
                Some(previous) => {
                    let query = session.query().map(str::to_string);
                    vec![session.begin_fetch(previous, query)]
                }
                None => Vec::new(),
            }
        }
        Msg::PrevPageClicked => {
            if session.is_busy() {
                return (session, Vec::new());
            }
            match session.retreat_page() {
                Some(previous) => {
                    let query = session.query().map(str::to_string);
                    vec![session.begin_fetch(previous, query)]
                }
                None => Vec::new(),
            }
        }
        Msg::SortChanged(order) => {
            session.set_sort_order(order);
            Vec::new()
        }
        Msg::ViewModeToggled => {
            session.toggle_view_mode();
            Vec::new()
        }
        Msg::CharacterSelected { id } => session
            .character(id)
            .cloned()
            .map(Effect::ShowDetail)
            .into_iter()
            .collect(),
        Msg::FavoriteToggleRequested { id } => vec![Effect::ToggleFavorite { id }],
        Msg::FavoriteChanged { id, .. } => {
            if session.character(id).is_some() {
                session.mark_dirty();
            }
            Vec::new()
        }
        Msg::FetchSucceeded {
            request_id,
            characters,
        } => {
            session.apply_page(request_id, characters);
            Vec::new()
        }
        Msg::FetchFailed { request_id, .. } => {
            session.apply_failure(request_id);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (session, effects)
}

fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
