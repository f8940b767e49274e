// SPDX-License-Identifier: MIT OR Apache-2.0

//! Player identity and piece bookkeeping

use crate::{Color, Coord, GameError};
use serde::{Deserialize, Serialize};

/// A participant in a game.
///
/// Players only record which catalog pieces they have used; the templates
/// themselves stay in the game's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: Color,
    /// Cell the first piece has to cover
    pub start_pos: Coord,
    /// One flag per catalog piece, `true` once placed
    pub placed_pieces: Vec<bool>,
}

impl Player {
    /// Create a player with nothing placed yet.
    ///
    /// The start position is not bounds checked here; the game does that
    /// against its board.
    pub fn new(
        name: impl Into<String>,
        color: Color,
        start_pos: Coord,
        num_pieces: usize,
    ) -> Result<Self, GameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GameError::InvalidArgument("player name cannot be empty"));
        }
        if !color.is_colored() {
            return Err(GameError::InvalidArgument("player color must be a playable color"));
        }
        if num_pieces == 0 {
            return Err(GameError::InvalidArgument("player needs at least one piece"));
        }
        Ok(Self {
            name,
            color,
            start_pos,
            placed_pieces: vec![false; num_pieces],
        })
    }

    /// Check that the piece exists and hasn't been used yet
    pub fn check_piece_placeability(&self, index: usize) -> Result<(), GameError> {
        match self.placed_pieces.get(index) {
            None => Err(GameError::IndexOutOfRange {
                index,
                len: self.placed_pieces.len(),
            }),
            Some(true) => Err(GameError::AlreadyPlaced(index)),
            Some(false) => Ok(()),
        }
    }

    /// Mark a piece as placed
    pub fn place_piece_at(&mut self, index: usize) -> Result<(), GameError> {
        self.check_piece_placeability(index)?;
        self.placed_pieces[index] = true;
        Ok(())
    }

    /// Catalog indices still available to this player
    pub fn remaining_pieces(&self) -> impl Iterator<Item = usize> + '_ {
        self.placed_pieces
            .iter()
            .enumerate()
            .filter(|(_, &placed)| !placed)
            .map(|(i, _)| i)
    }

    pub fn has_placed_all(&self) -> bool {
        self.placed_pieces.iter().all(|&placed| placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_validates_arguments() {
        let start = Coord::new(0, 0);
        assert!(matches!(
            Player::new("", Color::Blue, start, 3),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            Player::new("foo", Color::Empty, start, 3),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            Player::new("foo", Color::Blue, start, 0),
            Err(GameError::InvalidArgument(_))
        ));

        let p = Player::new("foo", Color::Blue, start, 3).unwrap();
        assert_eq!(p.placed_pieces, vec![false; 3]);
    }

    #[test]
    fn placing_twice_fails_without_side_effects() {
        let mut p = Player::new("foo", Color::Red, Coord::new(0, 0), 2).unwrap();
        p.place_piece_at(1).unwrap();
        assert_eq!(p.place_piece_at(1), Err(GameError::AlreadyPlaced(1)));
        assert_eq!(p.placed_pieces, vec![false, true]);
        assert_eq!(p.remaining_pieces().collect::<Vec<_>>(), vec![0]);
        assert!(!p.has_placed_all());
    }

    #[test]
    fn index_out_of_range() {
        let p = Player::new("foo", Color::Red, Coord::new(0, 0), 2).unwrap();
        assert_eq!(
            p.check_piece_placeability(2),
            Err(GameError::IndexOutOfRange { index: 2, len: 2 })
        );
    }
}
