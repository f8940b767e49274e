// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placement legality rules

use crate::{board::Board, piece::PlacedShape, Color, Coord, GameError};

/// Validates where a piece of a given color may go on a board
pub struct PlacementValidator<'a> {
    /// The board being checked
    board: &'a Board,
}

impl<'a> PlacementValidator<'a> {
    /// Create a new placement validator
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Check an oriented, anchored piece for the player owning `color`.
    ///
    /// Every block must be on the board, on an empty cell, and must not
    /// share an edge with a cell of the same color. Covering `start_pos`
    /// satisfies the placement on its own; otherwise one of the shape's
    /// corner cells has to hold the same color.
    pub fn check_placement(
        &self,
        shape: &PlacedShape,
        color: Color,
        start_pos: Coord,
    ) -> Result<(), GameError> {
        let mut covers_start = false;

        for &block in &shape.blocks {
            if self.board.is_out_of_bounds(block) {
                tracing::debug!(%block, "Placement rejected: block off the board");
                return Err(GameError::OutOfBounds(block));
            }

            let occupant = self.board.cell(block);
            if occupant.is_colored() {
                tracing::debug!(%block, %occupant, "Placement rejected: cell occupied");
                return Err(GameError::CellOccupied {
                    coord: block,
                    color: occupant,
                });
            }

            // Off-board neighbours read as Empty and never match a color
            if block
                .neighbors()
                .iter()
                .any(|&n| self.board.cell(n) == color)
            {
                tracing::debug!(%block, %color, "Placement rejected: edge touches same color");
                return Err(GameError::AdjacentSameColor {
                    coord: block,
                    color,
                });
            }

            covers_start |= block == start_pos;
        }

        if covers_start {
            return Ok(());
        }

        if self.touches_corner(shape, color) {
            Ok(())
        } else {
            tracing::debug!(%color, "Placement rejected: no corner contact");
            Err(GameError::NoCornerTouch(color))
        }
    }

    /// Whether any corner cell of the shape holds `color`
    pub fn touches_corner(&self, shape: &PlacedShape, color: Color) -> bool {
        shape
            .corners
            .iter()
            .any(|&c| !self.board.is_out_of_bounds(c) && self.board.cell(c) == color)
    }
}
