// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blokus Core - Game Rules and Board Logic
//!
//! This crate provides the rules engine for Blokus-style tile placement:
//! - Board representation with silent out-of-bounds handling
//! - Piece templates, corner computation and orientation transforms
//! - Player admission, turn order and the placement legality checks
//! - Standard scoring and a serializable game snapshot
//!
//! Coordinates follow the board's row/column layout: `x` grows downward and
//! `y` grows rightward, with `(0, 0)` at the top left corner.

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod defaults;
pub mod game;
pub mod orientation;
pub mod piece;
pub mod player;
pub mod rules;
pub mod scoring;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

pub use board::{Board, Corner};
pub use config::{GameOptions, PlayerOptions};
pub use defaults::{default_pieces, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
pub use game::{Game, GamePhase, GameSnapshot};
pub use orientation::{Orientation, Rotation};
pub use piece::{Piece, PlacedShape};
pub use player::Player;
pub use scoring::Score;

/// Color of a board cell or of a player's pieces.
///
/// Enumeration order matters: automatic color assignment hands out the
/// lowest colored value not yet taken.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Color {
    /// No piece covers the cell
    #[default]
    Empty,
    Blue,
    Yellow,
    Red,
    Green,
}

impl Color {
    /// Every color a player may own, in assignment order.
    pub const PLAYABLE: [Color; 4] = [Color::Blue, Color::Yellow, Color::Red, Color::Green];

    /// Returns true for any color other than `Empty`
    pub fn is_colored(self) -> bool {
        self != Color::Empty
    }

    /// Single character used when drawing a board as text
    pub fn symbol(self) -> char {
        match self {
            Color::Empty => '.',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    /// Lower-case name used in messages and text formats
    pub fn name(self) -> &'static str {
        match self {
            Color::Empty => "empty",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Green => "green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" | "" => Ok(Color::Empty),
            "blue" => Ok(Color::Blue),
            "yellow" => Ok(Color::Yellow),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            _ => Err(GameError::InvalidColor(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Color {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::Empty),
            1 => Ok(Color::Blue),
            2 => Ok(Color::Yellow),
            3 => Ok(Color::Red),
            4 => Ok(Color::Green),
            other => Err(GameError::InvalidColor(other.to_string())),
        }
    }
}

/// Board coordinate. `x` is the row (downward), `y` the column (rightward).
///
/// Coordinates are signed because piece templates and orientation
/// transforms produce negative offsets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`, clamping at the `i32` range
    fn offset(self, dx: i32, dy: i32) -> Coord {
        Coord::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// The four edge-sharing neighbours (up, down, left, right)
    pub fn neighbors(self) -> [Coord; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    /// The four corner-sharing neighbours
    pub fn diagonals(self) -> [Coord; 4] {
        [
            self.offset(-1, -1),
            self.offset(-1, 1),
            self.offset(1, -1),
            self.offset(1, 1),
        ]
    }
}

/// Saturating: a sum past the `i32` range stays at the edge, which is off
/// any board, rather than wrapping back onto it.
impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        self.offset(rhs.x, rhs.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

/// One entry of the append-only move log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// A piece was placed on the board
    Place {
        /// Name of the player who placed the piece
        player: String,
        /// Index into the game's piece catalog
        piece_index: usize,
        orientation: Orientation,
        location: Coord,
    },
    /// The player placed nothing this turn
    Pass {
        /// Name of the player who passed
        player: String,
    },
}

impl Move {
    /// Name of the player who made the move
    pub fn player(&self) -> &str {
        match self {
            Move::Place { player, .. } | Move::Pass { player } => player,
        }
    }

    /// Catalog index of the placed piece, `None` for a pass
    pub fn piece_index(&self) -> Option<usize> {
        match self {
            Move::Place { piece_index, .. } => Some(*piece_index),
            Move::Pass { .. } => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass { .. })
    }
}

/// Errors that can occur while setting up or playing a game
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Board dimensions must each be between 1 and `MAX_BOARD_SIZE`
    #[error("invalid board dimensions {height}x{width}")]
    InvalidDimension { height: usize, width: usize },

    /// Game board size outside the supported range
    #[error("board size must be between 1 and {max}, got {size}")]
    InvalidBoardSize { size: usize, max: usize },

    /// A game needs at least one piece in its catalog
    #[error("piece set cannot be empty")]
    EmptyPieceSet,

    /// A piece needs at least one block
    #[error("piece must have at least one block")]
    EmptyPiece,

    /// Named piece set does not exist
    #[error("unknown piece set: {0}")]
    UnknownPieceSet(String),

    /// Generic precondition failure on a constructor argument
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Player names cannot be empty
    #[error("player name cannot be empty")]
    EmptyName,

    /// Not a playable color
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Coordinate outside the board
    #[error("position is out of bounds: {0}")]
    OutOfBounds(Coord),

    #[error("player name already taken: {0}")]
    DuplicateName(String),

    #[error("color already taken: {0}")]
    DuplicateColor(Color),

    #[error("starting position already occupied: {0}")]
    DuplicateStartPos(Coord),

    /// Every playable color is already assigned
    #[error("no free colors left to assign")]
    NoFreeColors,

    /// Stored player data violates an invariant
    #[error("invalid player state: {0}")]
    InvalidPlayerState(String),

    /// No such player in this game
    #[error("Invalid player: {0:?}")]
    InvalidPlayer(String),

    /// The acting player does not own the current turn
    #[error("Turn belongs to {expected}, not {actual}")]
    WrongTurn { expected: String, actual: String },

    #[error("cannot advance turn: no players in game")]
    NoPlayers,

    /// Piece index outside the catalog
    #[error("piece index {index} out of range (catalog has {len} pieces)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("piece {0} already placed")]
    AlreadyPlaced(usize),

    /// Target cell already covered by a piece
    #[error("cell {coord} is occupied by a {color} piece")]
    CellOccupied { coord: Coord, color: Color },

    /// Edge contact with a piece of the same color
    #[error("block at {coord} is next to another {color} piece")]
    AdjacentSameColor { coord: Coord, color: Color },

    /// Neither the start position nor a same-colored corner is touched
    #[error("no corner touching another {0} piece")]
    NoCornerTouch(Color),

    /// Players can only join before the first move
    #[error("game already started")]
    GameAlreadyStarted,

    #[error("game is over")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ordering_and_predicates() {
        assert!(!Color::Empty.is_colored());
        assert!(Color::PLAYABLE.iter().all(|c| c.is_colored()));
        assert!(Color::Blue < Color::Yellow);
        assert!(Color::Red < Color::Green);
        assert_eq!(Color::default(), Color::Empty);
    }

    #[test]
    fn color_symbols_are_distinct() {
        let symbols: Vec<char> = [Color::Empty]
            .into_iter()
            .chain(Color::PLAYABLE)
            .map(Color::symbol)
            .collect();
        assert_eq!(symbols, vec!['.', 'B', 'Y', 'R', 'G']);
    }

    #[test]
    fn coord_arithmetic_saturates() {
        let edge = Coord::new(i32::MAX, i32::MIN);
        assert_eq!(edge + Coord::new(1, -1), edge);
        assert_eq!(edge.neighbors()[1], Coord::new(i32::MAX, i32::MIN));
        assert_eq!(Coord::new(2, 3) + Coord::new(-1, 4), Coord::new(1, 7));
    }

    #[test]
    fn color_text_and_numeric_forms() {
        assert_eq!(Color::Yellow.to_string(), "yellow");
        assert_eq!("Red".parse::<Color>(), Ok(Color::Red));
        assert_eq!(Color::try_from(4u8), Ok(Color::Green));
        assert!(matches!(
            "purple".parse::<Color>(),
            Err(GameError::InvalidColor(_))
        ));

        let err = Color::try_from(99u8).unwrap_err();
        assert!(err.to_string().contains("color"));
    }

    #[test]
    fn coord_neighbourhoods() {
        let c = Coord::new(2, 3);
        assert!(c.neighbors().contains(&Coord::new(1, 3)));
        assert!(c.neighbors().contains(&Coord::new(2, 4)));
        assert!(c.diagonals().contains(&Coord::new(1, 2)));
        assert!(c.diagonals().contains(&Coord::new(3, 4)));
        assert_eq!(c + Coord::new(-2, 1), Coord::new(0, 4));
    }

    #[test]
    fn move_accessors() {
        let pass = Move::Pass {
            player: "foo".to_string(),
        };
        assert!(pass.is_pass());
        assert_eq!(pass.piece_index(), None);
        assert_eq!(pass.player(), "foo");

        let place = Move::Place {
            player: "bar".to_string(),
            piece_index: 3,
            orientation: Orientation::default(),
            location: Coord::new(1, 1),
        };
        assert!(!place.is_pass());
        assert_eq!(place.piece_index(), Some(3));
        assert_eq!(place.player(), "bar");
    }
}
