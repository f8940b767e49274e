// SPDX-License-Identifier: MIT OR Apache-2.0

//! Standard end-of-game scoring

use crate::{Color, Game, Move};
use serde::{Deserialize, Serialize};

/// Bonus for placing every piece
pub const ALL_PLACED_BONUS: i32 = 15;

/// Extra bonus when the final piece placed was a single block
pub const SINGLE_BLOCK_LAST_BONUS: i32 = 5;

/// Score of one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: String,
    pub color: Color,
    /// Blocks in pieces the player hasn't placed
    pub remaining_squares: usize,
    pub points: i32,
}

/// Score every player: minus one per unplaced block, or a bonus when the
/// whole set went down.
pub fn calculate_scores(game: &Game) -> Vec<Score> {
    let pieces = game.pieces();
    game.players()
        .iter()
        .map(|player| {
            let remaining_squares: usize = player
                .remaining_pieces()
                .filter_map(|i| pieces.get(i))
                .map(|p| p.size())
                .sum();

            let points = if player.has_placed_all() {
                let last_single = game
                    .moves()
                    .iter()
                    .rev()
                    .find(|m| m.player() == player.name && !m.is_pass())
                    .and_then(Move::piece_index)
                    .and_then(|i| pieces.get(i))
                    .is_some_and(|p| p.size() == 1);
                if last_single {
                    ALL_PLACED_BONUS + SINGLE_BLOCK_LAST_BONUS
                } else {
                    ALL_PLACED_BONUS
                }
            } else {
                -(remaining_squares as i32)
            };

            Score {
                player: player.name.clone(),
                color: player.color,
                remaining_squares,
                points,
            }
        })
        .collect()
}

/// Names of the players sharing the highest score
pub fn winners(scores: &[Score]) -> Vec<&str> {
    let Some(best) = scores.iter().map(|s| s.points).max() else {
        return Vec::new();
    };
    scores
        .iter()
        .filter(|s| s.points == best)
        .map(|s| s.player.as_str())
        .collect()
}
