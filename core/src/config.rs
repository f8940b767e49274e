// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game and player options supplied by callers

use crate::defaults::{self, DEFAULT_BOARD_SIZE};
use crate::{Color, Coord, Corner, Game, GameError};
use serde::{Deserialize, Serialize};

/// Options for creating a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Length of one edge of the square board
    pub board_size: usize,
    /// Name of the starting piece set. Empty selects the standard set.
    pub piece_set: String,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            piece_set: String::new(),
        }
    }
}

impl GameOptions {
    /// Resolve the piece set and create the game
    pub fn new_game(&self) -> Result<Game, GameError> {
        let pieces = defaults::piece_set(&self.piece_set)?;
        Game::new(self.board_size, pieces)
    }
}

/// Options for joining a game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerOptions {
    /// `None` takes the next free color
    pub color: Option<Color>,
    /// `None` takes the first corner nobody starts from
    pub corner: Option<Corner>,
}

impl PlayerOptions {
    pub fn color(&self) -> Color {
        self.color.unwrap_or(Color::Empty)
    }

    /// Starting position on the game's board
    pub fn start_position(&self, game: &Game) -> Coord {
        let board = game.board();
        let taken = |c: Coord| game.players().iter().any(|p| p.start_pos == c);
        match self.corner {
            Some(corner) => board.corner_coord(corner),
            None => Corner::ALL
                .into_iter()
                .map(|corner| board.corner_coord(corner))
                .find(|&c| !taken(c))
                .unwrap_or_else(|| board.corner_coord(Corner::TopLeft)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_build_standard_game() {
        let game = GameOptions::default().new_game().unwrap();
        assert_eq!(game.board().height(), DEFAULT_BOARD_SIZE);
        assert_eq!(game.pieces().len(), 21);
    }

    #[test]
    fn unknown_piece_set_fails() {
        let opts = GameOptions {
            board_size: 14,
            piece_set: "hexominoes".to_string(),
        };
        assert!(matches!(
            opts.new_game(),
            Err(GameError::UnknownPieceSet(_))
        ));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: GameOptions = serde_json::from_str(r#"{"board_size": 14}"#).unwrap();
        assert_eq!(opts.board_size, 14);
        assert!(opts.piece_set.is_empty());

        let p: PlayerOptions = serde_json::from_str(r#"{"color": "Red"}"#).unwrap();
        assert_eq!(p.color(), Color::Red);
        assert_eq!(p.corner, None);
    }

    #[test]
    fn unpicked_corners_are_handed_out_in_order() {
        let mut game = GameOptions {
            board_size: 10,
            ..Default::default()
        }
        .new_game()
        .unwrap();
        let auto = PlayerOptions::default();

        let first = auto.start_position(&game);
        assert_eq!(first, Coord::new(0, 0));
        game.add_player("a", auto.color(), first).unwrap();

        let second = auto.start_position(&game);
        assert_eq!(second, Coord::new(0, 9));

        let chosen = PlayerOptions {
            corner: Some(Corner::BottomLeft),
            ..Default::default()
        };
        assert_eq!(chosen.start_position(&game), Coord::new(9, 0));
    }
}
