use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;

use catalog_core::{update, BrowseSession, CharacterDetailView, Msg};
use catalog_engine::FavoritesStore;

use super::effects::{EffectOutcome, EffectRunner};
use super::ui::render::{render_browse, render_detail};

/// Owns the browse session on a single thread.
///
/// User intents and engine completions both enter through [`dispatch`], so
/// session state is never touched from the engine's runtime threads.
///
/// [`dispatch`]: SessionDriver::dispatch
pub struct SessionDriver<W: Write> {
    session: BrowseSession,
    runner: EffectRunner,
    favorites: Arc<FavoritesStore>,
    out: W,
}

impl<W: Write> SessionDriver<W> {
    pub fn new(runner: EffectRunner, favorites: Arc<FavoritesStore>, out: W) -> Self {
        Self {
            session: BrowseSession::new(),
            runner,
            favorites,
            out,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &BrowseSession {
        &self.session
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let session = std::mem::take(&mut self.session);
            let (session, effects) = update(session, msg);
            self.session = session;

            for outcome in self.runner.run(effects) {
                match outcome {
                    EffectOutcome::Msg(follow_up) => inbox.push_back(follow_up),
                    EffectOutcome::ShowDetail(character) => {
                        let detail = CharacterDetailView::new(&character, self.favorites.as_ref());
                        self.out.write_all(render_detail(&detail).as_bytes())?;
                    }
                }
            }
        }

        if self.session.consume_dirty() {
            let view = self.session.view(self.favorites.as_ref());
            self.out.write_all(render_browse(&view).as_bytes())?;
        }
        self.out.flush()
    }

    /// Applies every completion the engine has delivered so far.
    pub fn pump_engine(&mut self) -> io::Result<usize> {
        let mut applied = 0;
        while let Some(msg) = self.runner.try_recv() {
            self.dispatch(msg)?;
            applied += 1;
        }
        Ok(applied)
    }

    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}
