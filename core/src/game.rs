// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game state: players, turn order, move log and piece placement

use crate::defaults::MAX_BOARD_SIZE;
use crate::piece::PlacedShape;
use crate::rules::PlacementValidator;
use crate::scoring::{self, Score};
use crate::{Board, Color, Coord, GameError, Move, Orientation, Piece, Player};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Coarse lifecycle of a game, derived from the move log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Players are joining, no move made yet
    Setup,
    /// At least one move made and the game hasn't ended
    InProgress,
    /// Every player passed during the most recent round
    Ended,
}

/// A single Blokus game.
///
/// The game owns its board, players and move log. The piece catalog is an
/// immutable, reference-counted slice that can be shared with other games.
/// All mutating operations validate completely before writing anything, so
/// a returned error means nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    pieces: Arc<[Piece]>,
    /// Insertion order is turn order
    players: Vec<Player>,
    current_player_index: usize,
    moves: Vec<Move>,
}

/// Serializable view of a game for collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub height: usize,
    pub width: usize,
    /// Row-major cell colors
    pub cells: Vec<Color>,
    pub players: Vec<Player>,
    pub current_player: Option<String>,
    pub phase: GamePhase,
    pub move_count: usize,
    pub last_move: Option<Move>,
    pub scores: Vec<Score>,
}

impl Game {
    /// Create a game on a square board with the given piece catalog
    pub fn new(board_size: usize, pieces: impl Into<Arc<[Piece]>>) -> Result<Self, GameError> {
        if board_size == 0 || board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidBoardSize {
                size: board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        let pieces = pieces.into();
        if pieces.is_empty() {
            return Err(GameError::EmptyPieceSet);
        }
        Ok(Self {
            board: Board::square(board_size)?,
            pieces,
            players: Vec::new(),
            current_player_index: 0,
            moves: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The shared piece catalog
    pub fn pieces(&self) -> &Arc<[Piece]> {
        &self.pieces
    }

    /// Players in turn order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The move log, oldest first
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Player whose turn it is, `None` before anyone joined
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Look up a player by name
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn phase(&self) -> GamePhase {
        if self.moves.is_empty() {
            GamePhase::Setup
        } else if self.is_game_end() {
            GamePhase::Ended
        } else {
            GamePhase::InProgress
        }
    }

    /// Lowest playable color not yet owned by a player
    pub fn next_free_color(&self) -> Result<Color, GameError> {
        if let Some(p) = self.players.iter().find(|p| !p.color.is_colored()) {
            return Err(GameError::InvalidPlayerState(format!(
                "player {} has no color",
                p.name
            )));
        }
        Color::PLAYABLE
            .into_iter()
            .find(|c| self.players.iter().all(|p| p.color != *c))
            .ok_or(GameError::NoFreeColors)
    }

    /// Add a player at the end of the turn order.
    ///
    /// `Color::Empty` asks for the next free color.
    pub fn add_player(
        &mut self,
        name: &str,
        color: Color,
        start_pos: Coord,
    ) -> Result<(), GameError> {
        if !self.moves.is_empty() {
            return Err(GameError::GameAlreadyStarted);
        }
        let color = if color.is_colored() {
            color
        } else {
            self.next_free_color()?
        };
        if self.board.is_out_of_bounds(start_pos) {
            return Err(GameError::OutOfBounds(start_pos));
        }
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        if self.players.iter().any(|p| p.name == name) {
            return Err(GameError::DuplicateName(name.to_string()));
        }
        if self.players.iter().any(|p| p.color == color) {
            return Err(GameError::DuplicateColor(color));
        }
        if self.players.iter().any(|p| p.start_pos == start_pos) {
            return Err(GameError::DuplicateStartPos(start_pos));
        }

        let player = Player::new(name, color, start_pos, self.pieces.len())?;
        tracing::info!(
            player = %player.name,
            color = %player.color,
            start = %player.start_pos,
            "Player joined"
        );
        self.players.push(player);
        Ok(())
    }

    /// Hand the first turn to the named player. Only allowed before any move.
    pub fn set_starting_player(&mut self, name: &str) -> Result<(), GameError> {
        if !self.moves.is_empty() {
            return Err(GameError::GameAlreadyStarted);
        }
        let idx = self
            .player_index(name)
            .ok_or_else(|| GameError::InvalidPlayer(name.to_string()))?;
        self.current_player_index = idx;
        Ok(())
    }

    /// Record a pass for the current player. The turn is not advanced.
    pub fn pass_turn(&mut self, player: &str) -> Result<(), GameError> {
        self.ensure_not_over()?;
        self.acting_player_index(player)?;

        tracing::info!(player, "Player passed");
        self.moves.push(Move::Pass {
            player: player.to_string(),
        });
        Ok(())
    }

    /// Place a catalog piece for the current player.
    ///
    /// On success the board, the player's placed flags and the move log are
    /// updated together. The turn is not advanced.
    pub fn place_piece(
        &mut self,
        player: &str,
        piece_index: usize,
        orientation: Orientation,
        location: Coord,
    ) -> Result<(), GameError> {
        self.ensure_not_over()?;
        let idx = self.acting_player_index(player)?;
        let shape = self.validate_placement(&self.players[idx], piece_index, orientation, location)?;

        let acting = &mut self.players[idx];
        acting.place_piece_at(piece_index)?;
        for &block in &shape.blocks {
            self.board.set_cell(block, acting.color);
        }

        tracing::info!(
            player,
            piece_index,
            rotation = orientation.rotation.quarter_turns(),
            flip = orientation.flip,
            location = %location,
            "Piece placed"
        );
        self.moves.push(Move::Place {
            player: player.to_string(),
            piece_index,
            orientation,
            location,
        });
        Ok(())
    }

    /// Check whether the named player could place the piece there, ignoring
    /// whose turn it is. Nothing is modified.
    pub fn check_piece_placement(
        &self,
        player: &str,
        piece_index: usize,
        orientation: Orientation,
        location: Coord,
    ) -> Result<(), GameError> {
        let p = self
            .player(player)
            .ok_or_else(|| GameError::InvalidPlayer(player.to_string()))?;
        self.validate_placement(p, piece_index, orientation, location)
            .map(|_| ())
    }

    /// Move the turn to the next player in order
    pub fn advance_turn(&mut self) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        Ok(())
    }

    /// True once the last `players.len()` moves are all passes.
    ///
    /// Players without pieces left still have to pass for the game to end.
    pub fn is_game_end(&self) -> bool {
        let n = self.players.len();
        if n == 0 || self.moves.len() < n {
            return false;
        }
        self.moves[self.moves.len() - n..].iter().all(Move::is_pass)
    }

    /// Current standings, one entry per player in turn order
    pub fn scores(&self) -> Vec<Score> {
        scoring::calculate_scores(self)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            height: self.board.height(),
            width: self.board.width(),
            cells: self.board.cells().to_vec(),
            players: self.players.clone(),
            current_player: self.current_player().map(|p| p.name.clone()),
            phase: self.phase(),
            move_count: self.moves.len(),
            last_move: self.moves.last().cloned(),
            scores: self.scores(),
        }
    }

    fn player_index(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    fn acting_player_index(&self, name: &str) -> Result<usize, GameError> {
        let idx = self
            .player_index(name)
            .ok_or_else(|| GameError::InvalidPlayer(name.to_string()))?;
        if idx != self.current_player_index {
            let expected = self
                .current_player()
                .map(|p| p.name.clone())
                .unwrap_or_default();
            return Err(GameError::WrongTurn {
                expected,
                actual: name.to_string(),
            });
        }
        Ok(idx)
    }

    fn ensure_not_over(&self) -> Result<(), GameError> {
        if self.is_game_end() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn validate_placement(
        &self,
        player: &Player,
        piece_index: usize,
        orientation: Orientation,
        location: Coord,
    ) -> Result<PlacedShape, GameError> {
        let piece = self
            .pieces
            .get(piece_index)
            .ok_or(GameError::IndexOutOfRange {
                index: piece_index,
                len: self.pieces.len(),
            })?;
        player.check_piece_placeability(piece_index)?;

        let shape = piece.orient(orientation, location);
        PlacementValidator::new(&self.board).check_placement(
            &shape,
            player.color,
            player.start_pos,
        )?;
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monomino_game() -> Game {
        let piece = Piece::new(vec![Coord::new(0, 0)]).unwrap();
        Game::new(10, vec![piece]).unwrap()
    }

    #[test]
    fn board_size_limits() {
        let piece = || vec![Piece::new(vec![Coord::new(0, 0)]).unwrap()];
        assert!(matches!(
            Game::new(0, piece()),
            Err(GameError::InvalidBoardSize { size: 0, .. })
        ));
        assert!(matches!(
            Game::new(101, piece()),
            Err(GameError::InvalidBoardSize { size: 101, .. })
        ));
        assert!(Game::new(1, piece()).is_ok());
        assert!(Game::new(100, piece()).is_ok());
        assert_eq!(
            Game::new(10, Vec::<Piece>::new()),
            Err(GameError::EmptyPieceSet)
        );
    }

    #[test]
    fn phase_follows_move_log() {
        let mut g = monomino_game();
        g.add_player("foo", Color::Blue, Coord::new(0, 0)).unwrap();
        assert_eq!(g.phase(), GamePhase::Setup);

        g.place_piece("foo", 0, Orientation::default(), Coord::new(0, 0))
            .unwrap();
        assert_eq!(g.phase(), GamePhase::InProgress);

        g.pass_turn("foo").unwrap();
        assert_eq!(g.phase(), GamePhase::Ended);
        assert_eq!(g.pass_turn("foo"), Err(GameError::GameOver));
    }

    #[test]
    fn no_players_is_never_ended() {
        let g = monomino_game();
        assert!(!g.is_game_end());
        assert!(g.current_player().is_none());
    }

    #[test]
    fn starting_player_only_during_setup() {
        let mut g = monomino_game();
        g.add_player("foo", Color::Blue, Coord::new(0, 0)).unwrap();
        g.add_player("bar", Color::Red, Coord::new(9, 9)).unwrap();
        g.set_starting_player("bar").unwrap();
        assert_eq!(g.current_player().map(|p| p.name.as_str()), Some("bar"));
        assert!(matches!(
            g.set_starting_player("baz"),
            Err(GameError::InvalidPlayer(_))
        ));

        g.pass_turn("bar").unwrap();
        assert_eq!(
            g.set_starting_player("foo"),
            Err(GameError::GameAlreadyStarted)
        );
        assert_eq!(
            g.add_player("late", Color::Empty, Coord::new(0, 9)),
            Err(GameError::GameAlreadyStarted)
        );
    }
}
