// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game storage behind a trait so the lobby can run over any backend

use crate::{GameId, LobbyError, Result};
use blokus_core::{Game, GameError};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Repository of games keyed by id.
///
/// Implementations must apply `update` atomically: the closure sees the
/// current game, and its changes are kept only when it returns `Ok`.
pub trait GameStore: Send + Sync {
    fn insert(&self, id: GameId, game: Game);

    /// A copy of the stored game
    fn get(&self, id: &str) -> Option<Game>;

    fn update(
        &self,
        id: &str,
        f: &mut dyn FnMut(&mut Game) -> Result<(), GameError>,
    ) -> Result<()>;

    fn remove(&self, id: &str) -> Option<Game>;

    fn ids(&self) -> Vec<GameId>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: RwLock<HashMap<GameId, Game>>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }
}

impl GameStore for InMemoryGameStore {
    fn insert(&self, id: GameId, game: Game) {
        self.games.write().insert(id, game);
    }

    fn get(&self, id: &str) -> Option<Game> {
        self.games.read().get(id).cloned()
    }

    fn update(
        &self,
        id: &str,
        f: &mut dyn FnMut(&mut Game) -> Result<(), GameError>,
    ) -> Result<()> {
        let mut games = self.games.write();
        let stored = games
            .get_mut(id)
            .ok_or_else(|| LobbyError::GameNotFound(id.to_string()))?;

        // Work on a copy so a failure halfway through a multi-step update
        // leaves the stored game untouched
        let mut working = stored.clone();
        f(&mut working)?;
        *stored = working;
        Ok(())
    }

    fn remove(&self, id: &str) -> Option<Game> {
        self.games.write().remove(id)
    }

    fn ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self.games.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}
