// SPDX-License-Identifier: MIT OR Apache-2.0

//! Standard board size and piece catalog

use crate::{GameError, Piece};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Default game board size
pub const DEFAULT_BOARD_SIZE: usize = 20;

/// Largest supported board edge
pub const MAX_BOARD_SIZE: usize = 100;

/// Name of the standard 21-piece set
pub const STANDARD_PIECE_SET: &str = "standard";

/// The 21 free polyominoes of one to five blocks
const STANDARD_SHAPES: [&[(i32, i32)]; 21] = [
    // 1 block
    &[(0, 0)],
    // 2 blocks
    &[(0, 0), (1, 0)],
    // 3 blocks
    &[(0, 0), (1, 0), (2, 0)],
    &[(0, 0), (1, 0), (1, 1)],
    // 4 blocks
    &[(0, 0), (1, 0), (2, 0), (3, 0)],
    &[(0, 0), (1, 0), (2, 0), (2, 1)],
    &[(0, 0), (1, 0), (2, 0), (1, 1)],
    &[(0, 0), (1, 0), (1, 1), (0, 1)],
    &[(0, 0), (1, 0), (1, 1), (2, 1)],
    // 5 blocks
    &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
    &[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1)],
    &[(0, 0), (1, 0), (2, 0), (2, 1), (3, 1)],
    &[(0, 0), (1, 0), (2, 0), (1, 1), (2, 1)],
    &[(0, 0), (1, 0), (2, 0), (0, 1), (2, 1)],
    &[(0, 0), (1, 0), (2, 0), (3, 0), (2, 1)],
    &[(0, 0), (1, 0), (2, 0), (2, 1), (2, -1)],
    &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)],
    &[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)],
    &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)],
    &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 1)],
    &[(0, 0), (1, 0), (2, 0), (1, 1), (1, -1)],
];

static STANDARD_PIECES: Lazy<Arc<[Piece]>> =
    Lazy::new(|| STANDARD_SHAPES.iter().map(|s| Piece::from_table(s)).collect());

/// The standard catalog. Built once and shared by every game that uses it.
pub fn default_pieces() -> Arc<[Piece]> {
    Arc::clone(&STANDARD_PIECES)
}

/// Look up a piece set by name. An empty name selects the standard set.
pub fn piece_set(name: &str) -> Result<Arc<[Piece]>, GameError> {
    match name.trim() {
        "" | STANDARD_PIECE_SET => Ok(default_pieces()),
        other => Err(GameError::UnknownPieceSet(other.to_string())),
    }
}
