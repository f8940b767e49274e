// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

use crate::defaults::MAX_BOARD_SIZE;
use crate::{Color, Coord, GameError};
use serde::{Deserialize, Serialize};

/// Board corners, used as conventional starting positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Corners in the order they are handed out when a player doesn't pick one
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
}

/// Rectangular grid of cell colors.
///
/// Each dimension is between 1 and `MAX_BOARD_SIZE`, and there is exactly one
/// cell per coordinate. Deserialization checks both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    /// Number of rows
    height: usize,
    /// Number of columns
    width: usize,
    /// Row-major cells, `x * width + y`
    cells: Vec<Color>,
}

/// Unchecked serialized form of a [`Board`]
#[derive(Deserialize)]
struct BoardData {
    height: usize,
    width: usize,
    cells: Vec<Color>,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self, Self::Error> {
        let mut board = Board::new(data.height, data.width)?;
        if data.cells.len() != board.cells.len() {
            return Err(GameError::InvalidArgument(
                "board cell count doesn't match its dimensions",
            ));
        }
        board.cells = data.cells;
        Ok(board)
    }
}

impl Board {
    /// Create an empty board with the given dimensions
    pub fn new(height: usize, width: usize) -> Result<Self, GameError> {
        let valid = 1..=MAX_BOARD_SIZE;
        if !valid.contains(&height) || !valid.contains(&width) {
            return Err(GameError::InvalidDimension { height, width });
        }
        Ok(Self {
            height,
            width,
            cells: vec![Color::Empty; height * width],
        })
    }

    /// Create an empty square board
    pub fn square(size: usize) -> Result<Self, GameError> {
        Self::new(size, size)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Check whether the coordinate lies outside the board
    pub fn is_out_of_bounds(&self, coord: Coord) -> bool {
        coord.x < 0
            || coord.y < 0
            || coord.x as usize >= self.height
            || coord.y as usize >= self.width
    }

    /// Color at the coordinate. Cells off the board read as `Empty`.
    pub fn cell(&self, coord: Coord) -> Color {
        match self.coord_to_index(coord) {
            Some(idx) => self.cells[idx],
            None => Color::Empty,
        }
    }

    /// Paint a cell. Writes outside the board are ignored.
    pub fn set_cell(&mut self, coord: Coord, color: Color) {
        if let Some(idx) = self.coord_to_index(coord) {
            self.cells[idx] = color;
        }
    }

    /// Number of cells painted with the given color
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == color).count()
    }

    /// Coordinate of a board corner
    pub fn corner_coord(&self, corner: Corner) -> Coord {
        let bottom = self.height as i32 - 1;
        let right = self.width as i32 - 1;
        match corner {
            Corner::TopLeft => Coord::new(0, 0),
            Corner::TopRight => Coord::new(0, right),
            Corner::BottomRight => Coord::new(bottom, right),
            Corner::BottomLeft => Coord::new(bottom, 0),
        }
    }

    /// Convert a coordinate to a cell index
    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.is_out_of_bounds(coord) {
            return None;
        }
        Some(coord.x as usize * self.width + coord.y as usize)
    }
}
