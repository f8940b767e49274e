// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blokus Lobby - game hosting on top of the rules engine
//!
//! This crate keeps many games side by side:
//! - A pluggable [`GameStore`] holding game state by id
//! - An async [`Lobby`] mirroring the game service operations
//! - Lobby events broadcast to any number of subscribers

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod lobby;
pub mod store;

use blokus_core::GameError;
use thiserror::Error;

pub use lobby::{GameInfo, Lobby, LobbyEvent};
pub use store::{GameStore, InMemoryGameStore};

// Type aliases
pub type GameId = String;

/// Errors returned by lobby operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LobbyError {
    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    #[error("game {0} has not been started")]
    NotStarted(GameId),

    #[error("game name cannot be empty")]
    EmptyGameName,

    #[error("Failed to broadcast lobby event: {0}")]
    Broadcast(String),

    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T, E = LobbyError> = std::result::Result<T, E>;
