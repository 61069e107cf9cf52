use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use catalog_core::{CharacterId, FavoriteLookup};
use catalog_logging::{catalog_error, catalog_info, catalog_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

pub const FAVORITES_FILENAME: &str = "favorites.json";
/// Storage key holding the favorited ids inside the favorites file.
pub const FAVORITES_KEY: &str = "favoriteCharacters";

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedFavorites {
    #[serde(rename = "favoriteCharacters", default)]
    favorite_characters: Vec<CharacterId>,
}

/// Favorited character ids, persisted as JSON under `favoriteCharacters`.
///
/// The file is read on first access and rewritten on every toggle. Each
/// toggle holds the lock across read-modify-write, so concurrent toggles
/// serialize. Storage failures are logged and never returned.
#[derive(Debug)]
pub struct FavoritesStore {
    data_dir: PathBuf,
    path: PathBuf,
    loaded: Mutex<Option<HashSet<CharacterId>>>,
}

impl FavoritesStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            path: data_dir.join(FAVORITES_FILENAME),
            data_dir,
            loaded: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_favorite(&self, id: CharacterId) -> bool {
        self.with_set(|set| set.contains(&id))
    }

    /// Flips membership of `id` and returns the new state.
    pub fn toggle(&self, id: CharacterId) -> bool {
        let mut guard = self.lock_loaded();
        let set = guard.get_or_insert_with(|| load_favorites(&self.path));
        let is_favorite = if set.remove(&id) {
            false
        } else {
            set.insert(id);
            true
        };
        self.save(set);
        is_favorite
    }

    pub fn all(&self) -> HashSet<CharacterId> {
        self.with_set(|set| set.clone())
    }

    fn with_set<R>(&self, f: impl FnOnce(&HashSet<CharacterId>) -> R) -> R {
        let mut guard = self.lock_loaded();
        let set = guard.get_or_insert_with(|| load_favorites(&self.path));
        f(set)
    }

    fn lock_loaded(&self) -> MutexGuard<'_, Option<HashSet<CharacterId>>> {
        self.loaded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn save(&self, set: &HashSet<CharacterId>) {
        let mut ids: Vec<_> = set.iter().copied().collect();
        ids.sort_unstable();
        let state = PersistedFavorites {
            favorite_characters: ids,
        };
        let content = match serde_json::to_string_pretty(&state) {
            Ok(text) => text,
            Err(err) => {
                catalog_error!("Failed to serialize favorites: {}", err);
                return;
            }
        };
        if let Err(err) = replace_file(&self.data_dir, &self.path, &content) {
            catalog_error!("Failed to write favorites to {:?}: {}", self.path, err);
        }
    }
}

impl FavoriteLookup for FavoritesStore {
    fn is_favorite(&self, id: CharacterId) -> bool {
        FavoritesStore::is_favorite(self, id)
    }
}

/// Writes through a sibling temp file and renames it over `target`, so a
/// reader never sees a truncated favorites file.
fn replace_file(dir: &Path, target: &Path, content: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

fn load_favorites(path: &Path) -> HashSet<CharacterId> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return HashSet::new();
        }
        Err(err) => {
            catalog_warn!("Failed to read favorites from {:?}: {}", path, err);
            return HashSet::new();
        }
    };

    let state: PersistedFavorites = match serde_json::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            catalog_warn!("Failed to parse favorites from {:?}: {}", path, err);
            return HashSet::new();
        }
    };

    let set: HashSet<_> = state.favorite_characters.into_iter().collect();
    catalog_info!("Loaded {} favorites from {:?}", set.len(), path);
    set
}
