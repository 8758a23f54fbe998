//! Game-state storage keyed by game id.
//!
//! Repositories hold the latest snapshot of each game. `update` is the only
//! way the service writes to an existing game: it holds that game's lock
//! across load, compute and store, so two concurrent actions on the same
//! game are applied one after the other and neither is lost.

use std::sync::{Arc, Mutex, RwLock};

use rustc_hash::FxHashMap;

use crate::core::GameState;

use super::error::RepositoryError;

type Result<T> = std::result::Result<T, RepositoryError>;

/// Id-keyed game-state storage with per-id serialized updates.
pub trait GameRepository: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Option<GameState>>;

    /// Insert or overwrite the snapshot stored under `state.id`.
    fn save(&self, state: &GameState) -> Result<()>;

    /// Remove a game, returning its last snapshot.
    fn delete(&self, id: &str) -> Result<Option<GameState>>;

    /// Ids of every stored game, sorted.
    fn ids(&self) -> Result<Vec<String>>;

    /// Every stored game, sorted by id.
    fn all(&self) -> Result<Vec<GameState>>;

    /// Replace the snapshot under `id` with `f(current)`.
    ///
    /// Returns `Ok(None)` without calling `f` if `id` is unknown. If `f`
    /// fails the stored snapshot is left as it was.
    fn update<E, F>(&self, id: &str, f: F) -> std::result::Result<Option<GameState>, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&GameState) -> std::result::Result<GameState, E>;
}

/// One game's snapshot. `None` once the game is deleted: a caller that
/// looked the slot up before the delete must not write to it.
type Slot = Arc<Mutex<Option<Vec<u8>>>>;

/// In-memory repository storing `bincode` snapshots.
///
/// Each game has its own mutex; the map lock is only held to look up,
/// insert or remove a slot.
#[derive(Default)]
pub struct InMemoryGameRepository {
    games: RwLock<FxHashMap<String, Slot>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: &str) -> Result<Option<Slot>> {
        let games = self.games.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(games.get(id).cloned())
    }

    /// Run `f` against the snapshot in `slot`, unless it was deleted.
    fn update_slot<E, F>(slot: &Slot, f: F) -> std::result::Result<Option<GameState>, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&GameState) -> std::result::Result<GameState, E>,
    {
        let mut bytes = slot.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        let Some(current) = bytes.as_deref() else {
            return Ok(None);
        };
        let current = decode(current)?;
        let next = f(&current)?;
        *bytes = Some(encode(&next)?);
        Ok(Some(next))
    }
}

fn encode(state: &GameState) -> Result<Vec<u8>> {
    Ok(bincode::serialize(state)?)
}

fn decode(bytes: &[u8]) -> Result<GameState> {
    Ok(bincode::deserialize(bytes)?)
}

impl GameRepository for InMemoryGameRepository {
    fn find_by_id(&self, id: &str) -> Result<Option<GameState>> {
        let Some(slot) = self.slot(id)? else {
            return Ok(None);
        };
        let bytes = slot.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        bytes.as_deref().map(decode).transpose()
    }

    fn save(&self, state: &GameState) -> Result<()> {
        let bytes = encode(state)?;
        loop {
            let slot = {
                let mut games = self.games.write().map_err(|_| RepositoryError::LockPoisoned)?;
                match games.get(&state.id) {
                    Some(slot) => Arc::clone(slot),
                    None => {
                        games.insert(state.id.clone(), Arc::new(Mutex::new(Some(bytes))));
                        return Ok(());
                    }
                }
            };
            let mut current = slot.lock().map_err(|_| RepositoryError::LockPoisoned)?;
            // A deleted slot is already out of the map; look again.
            if current.is_some() {
                *current = Some(bytes);
                return Ok(());
            }
        }
    }

    fn delete(&self, id: &str) -> Result<Option<GameState>> {
        let removed = self
            .games
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .remove(id);
        let Some(slot) = removed else {
            return Ok(None);
        };
        let bytes = slot.lock().map_err(|_| RepositoryError::LockPoisoned)?.take();
        bytes.as_deref().map(decode).transpose()
    }

    fn ids(&self) -> Result<Vec<String>> {
        let games = self.games.read().map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<String> = games.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn all(&self) -> Result<Vec<GameState>> {
        let mut slots: Vec<(String, Slot)> = {
            let games = self.games.read().map_err(|_| RepositoryError::LockPoisoned)?;
            games.iter().map(|(id, slot)| (id.clone(), Arc::clone(slot))).collect()
        };
        slots.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut states = Vec::with_capacity(slots.len());
        for (_, slot) in slots {
            let bytes = slot.lock().map_err(|_| RepositoryError::LockPoisoned)?;
            // Skip games deleted since the listing.
            if let Some(bytes) = bytes.as_deref() {
                states.push(decode(bytes)?);
            }
        }
        Ok(states)
    }

    fn update<E, F>(&self, id: &str, f: F) -> std::result::Result<Option<GameState>, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&GameState) -> std::result::Result<GameState, E>,
    {
        match self.slot(id)? {
            Some(slot) => Self::update_slot(&slot, f),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameStatus, Player};
    use im::Vector;
    use std::thread;

    fn state(id: &str) -> GameState {
        GameState::new(
            id,
            Vector::from(vec![Player::player("p1"), Player::host("h")]),
            Vector::unit("w1".to_string()),
        )
    }

    #[test]
    fn test_save_and_find() {
        let repo = InMemoryGameRepository::new();
        repo.save(&state("g1")).unwrap();

        assert_eq!(repo.find_by_id("g1").unwrap(), Some(state("g1")));
        assert_eq!(repo.find_by_id("g2").unwrap(), None);
    }

    #[test]
    fn test_save_overwrites() {
        let repo = InMemoryGameRepository::new();
        repo.save(&state("g1")).unwrap();
        let cancelled = state("g1").with_status(GameStatus::Cancelled);
        repo.save(&cancelled).unwrap();

        assert_eq!(repo.find_by_id("g1").unwrap(), Some(cancelled));
        assert_eq!(repo.ids().unwrap(), vec!["g1".to_string()]);
    }

    #[test]
    fn test_delete_returns_snapshot() {
        let repo = InMemoryGameRepository::new();
        repo.save(&state("g1")).unwrap();

        assert_eq!(repo.delete("g1").unwrap(), Some(state("g1")));
        assert_eq!(repo.delete("g1").unwrap(), None);
        assert!(repo.ids().unwrap().is_empty());
    }

    #[test]
    fn test_listings_sorted() {
        let repo = InMemoryGameRepository::new();
        for id in ["b", "c", "a"] {
            repo.save(&state(id)).unwrap();
        }
        assert_eq!(repo.ids().unwrap(), vec!["a", "b", "c"]);

        let all: Vec<_> = repo.all().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(all, ["a", "b", "c"]);
    }

    #[test]
    fn test_update_unknown_id_skips_closure() {
        let repo = InMemoryGameRepository::new();
        let result: std::result::Result<_, RepositoryError> =
            repo.update("missing", |_| panic!("closure must not run"));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_failed_update_keeps_snapshot() {
        let repo = InMemoryGameRepository::new();
        repo.save(&state("g1")).unwrap();

        let result = repo.update("g1", |_| Err(RepositoryError::LockPoisoned));
        assert!(matches!(result, Err(RepositoryError::LockPoisoned)));
        assert_eq!(repo.find_by_id("g1").unwrap(), Some(state("g1")));
    }

    #[test]
    fn test_update_after_delete_is_dropped() {
        let repo = InMemoryGameRepository::new();
        repo.save(&state("g1")).unwrap();
        let stale = repo.slot("g1").unwrap().unwrap();

        assert_eq!(repo.delete("g1").unwrap(), Some(state("g1")));
        let result: std::result::Result<_, RepositoryError> =
            InMemoryGameRepository::update_slot(&stale, |_| panic!("closure must not run"));
        assert!(matches!(result, Ok(None)));

        // A game re-created under the same id is not touched either.
        let recreated = state("g1").with_status(GameStatus::Concluded);
        repo.save(&recreated).unwrap();
        let result: std::result::Result<_, RepositoryError> =
            InMemoryGameRepository::update_slot(&stale, |_| panic!("closure must not run"));
        assert!(matches!(result, Ok(None)));
        assert_eq!(repo.find_by_id("g1").unwrap(), Some(recreated));
    }

    #[test]
    fn test_delete_waits_for_running_update() {
        let repo = InMemoryGameRepository::new();
        repo.save(&state("g1")).unwrap();
        let cancelled = state("g1").with_status(GameStatus::Cancelled);

        thread::scope(|scope| {
            let mut deleter = None;
            let updated = repo
                .update("g1", |current| {
                    deleter = Some(scope.spawn(|| repo.delete("g1")));
                    // The delete has unlinked the game and now waits on its lock.
                    while !repo.ids()?.is_empty() {
                        thread::yield_now();
                    }
                    Ok::<_, RepositoryError>(current.clone().with_status(GameStatus::Cancelled))
                })
                .unwrap();
            assert_eq!(updated, Some(cancelled.clone()));

            let removed = deleter.take().unwrap().join().unwrap().unwrap();
            assert_eq!(removed, Some(cancelled));
        });
        assert_eq!(repo.find_by_id("g1").unwrap(), None);
    }

    #[test]
    fn test_save_after_delete_recreates() {
        let repo = InMemoryGameRepository::new();
        repo.save(&state("g1")).unwrap();
        repo.delete("g1").unwrap();
        repo.save(&state("g1")).unwrap();

        assert_eq!(repo.find_by_id("g1").unwrap(), Some(state("g1")));
        assert_eq!(repo.ids().unwrap(), vec!["g1"]);
    }
}
