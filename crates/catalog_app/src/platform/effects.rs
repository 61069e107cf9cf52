use std::sync::Arc;

use catalog_core::{Character, Effect, Msg};
use catalog_engine::{EngineEvent, EngineHandle, FavoritesStore, RequestSigner};
use catalog_logging::{catalog_error, catalog_info};

/// What an executed effect hands back to the session driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectOutcome {
    Msg(Msg),
    ShowDetail(Character),
}

pub struct EffectRunner {
    engine: EngineHandle,
    signer: RequestSigner,
    favorites: Arc<FavoritesStore>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        signer: RequestSigner,
        favorites: Arc<FavoritesStore>,
    ) -> Self {
        Self {
            engine,
            signer,
            favorites,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) -> Vec<EffectOutcome> {
        let mut outcomes = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchPage { request_id, page } => {
                    match self.signer.build_endpoint(
                        page.page_index,
                        page.page_size,
                        page.query.as_deref(),
                    ) {
                        Ok(endpoint) => {
                            // The endpoint carries credentials; log the page, not the URL.
                            catalog_info!(
                                "FetchPage request_id={} page_index={} page_size={} query={:?}",
                                request_id,
                                page.page_index,
                                page.page_size,
                                page.query
                            );
                            if let Err(err) = self.engine.fetch(request_id, endpoint) {
                                outcomes.push(EffectOutcome::Msg(Msg::FetchFailed {
                                    request_id,
                                    message: err.to_string(),
                                }));
                            }
                        }
                        Err(err) => {
                            catalog_error!(
                                "Could not build endpoint for request_id={}: {}",
                                request_id,
                                err
                            );
                            outcomes.push(EffectOutcome::Msg(Msg::FetchFailed {
                                request_id,
                                message: err.to_string(),
                            }));
                        }
                    }
                }
                Effect::ToggleFavorite { id } => {
                    let is_favorite = self.favorites.toggle(id);
                    catalog_info!("Favorite id={} is_favorite={}", id, is_favorite);
                    outcomes.push(EffectOutcome::Msg(Msg::FavoriteChanged { id, is_favorite }));
                }
                Effect::ShowDetail(character) => {
                    outcomes.push(EffectOutcome::ShowDetail(character));
                }
            }
        }
        outcomes
    }

    /// Next engine completion, already translated for the session.
    pub fn try_recv(&self) -> Option<Msg> {
        self.engine.try_recv().map(event_to_msg)
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FetchCompleted { request_id, result } => match result {
            Ok(characters) => Msg::FetchSucceeded {
                request_id,
                characters,
            },
            Err(err) => Msg::FetchFailed {
                request_id,
                message: err.to_string(),
            },
        },
    }
}
