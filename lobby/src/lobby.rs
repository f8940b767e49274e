// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process lobby hosting many games.
//!   * create_game / add_player / start_game / place_piece / pass_turn
//!   * game state lives in a [`GameStore`], lobby metadata stays here
//!   * broadcast LobbyEvent via tokio::sync::broadcast

use crate::store::GameStore;
use crate::{GameId, LobbyError, Result};
use blokus_core::{Color, Coord, GameError, GameOptions, GameSnapshot, Move, Orientation, PlayerOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Information about a game in the lobby
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    /// Unique identifier for the game
    pub id: GameId,
    /// Display name
    pub name: String,
    /// User who created the game
    pub owner: String,
    /// Board edge length
    pub board_size: usize,
    /// Whether the game has started
    pub started: bool,
    /// Player names in turn order
    pub players: Vec<String>,
}

/// Events emitted by the lobby
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyEvent {
    /// A new game was created
    GameCreated(GameInfo),
    /// A player joined a game
    PlayerJoined {
        game_id: GameId,
        player: String,
        color: Color,
    },
    /// A game was started
    GameStarted(GameId),
    /// A piece was placed or a turn passed
    MovePlayed { game_id: GameId, mv: Move },
    /// Every player passed in the last round
    GameEnded(GameId),
    /// A game was removed from the lobby
    GameRemoved(GameId),
}

/// Service for hosting games
pub struct Lobby {
    /// Lobby metadata per game
    games: Arc<RwLock<HashMap<GameId, GameInfo>>>,
    /// Game state
    store: Arc<dyn GameStore>,
    /// Lobby event broadcaster
    events_tx: broadcast::Sender<LobbyEvent>,
    /// Keep a receiver alive to prevent channel closure
    _events_rx: broadcast::Receiver<LobbyEvent>,
}

impl Lobby {
    /// Create a lobby over the given store
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        let (events_tx, events_rx) = broadcast::channel(100);

        Self {
            games: Arc::new(RwLock::new(HashMap::new())),
            store,
            events_tx,
            _events_rx: events_rx,
        }
    }

    /// Get a receiver for lobby events
    pub fn subscribe(&self) -> broadcast::Receiver<LobbyEvent> {
        self.events_tx.subscribe()
    }

    /// Create a new game owned by `owner`
    #[tracing::instrument(level = "debug", skip(self, opts))]
    pub async fn create_game(&self, owner: &str, name: &str, opts: GameOptions) -> Result<GameId> {
        if owner.is_empty() {
            return Err(GameError::EmptyName.into());
        }
        if name.is_empty() {
            return Err(LobbyError::EmptyGameName);
        }
        let game = opts.new_game()?;

        let game_id = format!("game-{}", uuid::Uuid::new_v4());
        let game_info = GameInfo {
            id: game_id.clone(),
            name: name.to_string(),
            owner: owner.to_string(),
            board_size: opts.board_size,
            started: false,
            players: Vec::new(),
        };

        {
            let mut games = self.games.write().await;
            self.store.insert(game_id.clone(), game);
            games.insert(game_id.clone(), game_info.clone());
        }

        tracing::info!(game_id = %game_id, board_size = opts.board_size, "Game created");
        self.broadcast(LobbyEvent::GameCreated(game_info))?;
        Ok(game_id)
    }

    /// Add a player to a game that hasn't started. Returns the player's color.
    #[tracing::instrument(level = "debug", skip(self, opts))]
    pub async fn add_player(&self, game_id: &str, username: &str, opts: PlayerOptions) -> Result<Color> {
        let mut games = self.games.write().await;
        let info = games
            .get_mut(game_id)
            .ok_or_else(|| LobbyError::GameNotFound(game_id.to_string()))?;
        if info.started {
            return Err(GameError::GameAlreadyStarted.into());
        }

        let mut color = Color::Empty;
        self.store.update(game_id, &mut |game| {
            let start = opts.start_position(game);
            game.add_player(username, opts.color(), start)?;
            color = game.player(username).map_or(Color::Empty, |p| p.color);
            Ok(())
        })?;
        info.players.push(username.to_string());
        drop(games);

        self.broadcast(LobbyEvent::PlayerJoined {
            game_id: game_id.to_string(),
            player: username.to_string(),
            color,
        })?;
        Ok(color)
    }

    /// Start a game with `username` taking the first turn
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn start_game(&self, game_id: &str, username: &str) -> Result<()> {
        {
            let mut games = self.games.write().await;
            let info = games
                .get_mut(game_id)
                .ok_or_else(|| LobbyError::GameNotFound(game_id.to_string()))?;
            if info.started {
                return Err(GameError::GameAlreadyStarted.into());
            }
            self.store
                .update(game_id, &mut |game| game.set_starting_player(username))?;
            info.started = true;
        }

        tracing::info!(game_id = %game_id, first = %username, "Game started");
        self.broadcast(LobbyEvent::GameStarted(game_id.to_string()))
    }

    /// Place a piece for `username`, then hand the turn to the next player
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn place_piece(
        &self,
        game_id: &str,
        username: &str,
        piece_index: usize,
        orientation: Orientation,
        location: Coord,
    ) -> Result<()> {
        self.ensure_started(game_id).await?;
        self.store.update(game_id, &mut |game| {
            game.place_piece(username, piece_index, orientation, location)?;
            game.advance_turn()
        })?;

        self.broadcast(LobbyEvent::MovePlayed {
            game_id: game_id.to_string(),
            mv: Move::Place {
                player: username.to_string(),
                piece_index,
                orientation,
                location,
            },
        })
    }

    /// Pass for `username`, then hand the turn to the next player
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn pass_turn(&self, game_id: &str, username: &str) -> Result<()> {
        self.ensure_started(game_id).await?;
        let mut ended = false;
        self.store.update(game_id, &mut |game| {
            game.pass_turn(username)?;
            game.advance_turn()?;
            ended = game.is_game_end();
            Ok(())
        })?;

        self.broadcast(LobbyEvent::MovePlayed {
            game_id: game_id.to_string(),
            mv: Move::Pass {
                player: username.to_string(),
            },
        })?;
        if ended {
            tracing::info!(game_id = %game_id, "Game ended");
            self.broadcast(LobbyEvent::GameEnded(game_id.to_string()))?;
        }
        Ok(())
    }

    /// Current view of a game
    pub async fn game_state(&self, game_id: &str) -> Result<GameSnapshot> {
        self.store
            .get(game_id)
            .map(|game| game.snapshot())
            .ok_or_else(|| LobbyError::GameNotFound(game_id.to_string()))
    }

    /// List all games, ordered by id
    pub async fn list_games(&self) -> Vec<GameInfo> {
        let games = self.games.read().await;
        let mut list: Vec<GameInfo> = games.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }

    /// Remove a game from the lobby
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn remove_game(&self, game_id: &str) -> Result<()> {
        {
            let mut games = self.games.write().await;
            if games.remove(game_id).is_none() {
                return Err(LobbyError::GameNotFound(game_id.to_string()));
            }
            self.store.remove(game_id);
        }

        self.broadcast(LobbyEvent::GameRemoved(game_id.to_string()))
    }

    async fn ensure_started(&self, game_id: &str) -> Result<()> {
        let games = self.games.read().await;
        match games.get(game_id) {
            None => Err(LobbyError::GameNotFound(game_id.to_string())),
            Some(info) if !info.started => Err(LobbyError::NotStarted(game_id.to_string())),
            Some(_) => Ok(()),
        }
    }

    fn broadcast(&self, event: LobbyEvent) -> Result<()> {
        tracing::debug!(?event, "Broadcasting lobby event");
        self.events_tx
            .send(event)
            .map(|_| ())
            .map_err(|e| LobbyError::Broadcast(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryGameStore;

    fn lobby() -> Lobby {
        Lobby::new(Arc::new(InMemoryGameStore::new()))
    }

    #[tokio::test]
    async fn test_lobby_create_game() {
        let lobby = lobby();
        let _rx = lobby.subscribe();

        let game_id = lobby
            .create_game("alice", "Test Game", GameOptions::default())
            .await
            .unwrap();
        assert!(game_id.starts_with("game-"));

        let games = lobby.list_games().await;
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, game_id);
        assert_eq!(games[0].name, "Test Game");
        assert_eq!(games[0].owner, "alice");
        assert_eq!(games[0].board_size, 20);
        assert!(!games[0].started);
    }

    #[tokio::test]
    async fn test_lobby_rejects_bad_create() {
        let lobby = lobby();
        assert_eq!(
            lobby.create_game("", "x", GameOptions::default()).await,
            Err(LobbyError::Game(GameError::EmptyName))
        );
        assert_eq!(
            lobby.create_game("alice", "", GameOptions::default()).await,
            Err(LobbyError::EmptyGameName)
        );
        let opts = GameOptions {
            board_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            lobby.create_game("alice", "x", opts).await,
            Err(LobbyError::Game(GameError::InvalidBoardSize { .. }))
        ));
        assert!(lobby.list_games().await.is_empty());
    }

    #[tokio::test]
    async fn test_moves_before_start_are_refused() {
        let lobby = lobby();
        let id = lobby
            .create_game("alice", "g", GameOptions::default())
            .await
            .unwrap();
        lobby
            .add_player(&id, "alice", PlayerOptions::default())
            .await
            .unwrap();

        assert_eq!(
            lobby.pass_turn(&id, "alice").await,
            Err(LobbyError::NotStarted(id.clone()))
        );
        assert_eq!(lobby.game_state(&id).await.unwrap().move_count, 0);
    }
}
