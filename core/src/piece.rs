// SPDX-License-Identifier: MIT OR Apache-2.0

//! Piece templates and the corner cells derived from them

use crate::{Coord, GameError, Orientation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Immutable shape template made of one or more square blocks.
///
/// Block offsets are relative to an anchor; the first block is conventionally
/// `(0, 0)`. Templates are shared read-only by every player of every game that
/// uses the catalog, so orienting a piece always produces new coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coord>", into = "Vec<Coord>")]
pub struct Piece {
    blocks: Vec<Coord>,
    corners: OnceCell<BTreeSet<Coord>>,
}

/// Absolute cells covered and cornered by a piece at a given placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedShape {
    pub blocks: Vec<Coord>,
    pub corners: Vec<Coord>,
}

impl Piece {
    /// Create a template from block offsets
    pub fn new(blocks: Vec<Coord>) -> Result<Self, GameError> {
        if blocks.is_empty() {
            return Err(GameError::EmptyPiece);
        }
        Ok(Self {
            blocks,
            corners: OnceCell::new(),
        })
    }

    /// Build a template from a built-in, non-empty block table
    pub(crate) fn from_table(blocks: &[(i32, i32)]) -> Self {
        debug_assert!(!blocks.is_empty());
        Self {
            blocks: blocks.iter().map(|&c| Coord::from(c)).collect(),
            corners: OnceCell::new(),
        }
    }

    pub fn blocks(&self) -> &[Coord] {
        &self.blocks
    }

    /// Number of blocks in the piece
    pub fn size(&self) -> usize {
        self.blocks.len()
    }

    /// Diagonal-only touch cells of the template, computed on first use
    pub fn corners(&self) -> &BTreeSet<Coord> {
        self.corners.get_or_init(|| compute_corners(&self.blocks))
    }

    /// Orient the template and anchor it at `location`
    pub fn orient(&self, orientation: Orientation, location: Coord) -> PlacedShape {
        let corners: Vec<Coord> = self.corners().iter().copied().collect();
        PlacedShape {
            blocks: orientation
                .transform_all(&self.blocks)
                .into_iter()
                .map(|c| location + c)
                .collect(),
            corners: orientation
                .transform_all(&corners)
                .into_iter()
                .map(|c| location + c)
                .collect(),
        }
    }

    /// Orientation-independent form of the shape: the smallest sorted,
    /// origin-shifted block list over all eight orientations.
    pub fn canonical_form(&self) -> Vec<Coord> {
        Orientation::all()
            .map(|o| normalized(o.transform_all(&self.blocks)))
            .min()
            .unwrap_or_default()
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.blocks == other.blocks
    }
}

impl Eq for Piece {}

impl TryFrom<Vec<Coord>> for Piece {
    type Error = GameError;

    fn try_from(blocks: Vec<Coord>) -> Result<Self, Self::Error> {
        Piece::new(blocks)
    }
}

impl From<Piece> for Vec<Coord> {
    fn from(piece: Piece) -> Self {
        piece.blocks
    }
}

/// Cells touching the shape only diagonally.
///
/// Collects the diagonal neighbours of every block, then drops any that is a
/// block itself or shares an edge with one.
pub fn compute_corners(blocks: &[Coord]) -> BTreeSet<Coord> {
    let occupied: BTreeSet<Coord> = blocks.iter().copied().collect();
    let edges: BTreeSet<Coord> = blocks.iter().flat_map(|b| b.neighbors()).collect();

    blocks
        .iter()
        .flat_map(|b| b.diagonals())
        .filter(|c| !occupied.contains(c) && !edges.contains(c))
        .collect()
}

fn normalized(mut coords: Vec<Coord>) -> Vec<Coord> {
    let min_x = coords.iter().map(|c| c.x).min().unwrap_or(0);
    let min_y = coords.iter().map(|c| c.y).min().unwrap_or(0);
    for c in &mut coords {
        *c = Coord::new(c.x.saturating_sub(min_x), c.y.saturating_sub(min_y));
    }
    coords.sort();
    coords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rotation;

    fn coords(cs: &[(i32, i32)]) -> Vec<Coord> {
        cs.iter().map(|&c| Coord::from(c)).collect()
    }

    #[test]
    fn single_block_has_four_corners() {
        let piece = Piece::new(coords(&[(0, 0)])).unwrap();
        let want: BTreeSet<Coord> = coords(&[(-1, -1), (-1, 1), (1, -1), (1, 1)])
            .into_iter()
            .collect();
        assert_eq!(piece.corners(), &want);
    }

    #[test]
    fn corners_exclude_edge_neighbours() {
        // S tetromino
        let piece = Piece::new(coords(&[(0, 0), (1, 0), (1, 1), (2, 1)])).unwrap();
        let want: BTreeSet<Coord> = coords(&[(-1, -1), (-1, 1), (0, 2), (2, -1), (3, 0), (3, 2)])
            .into_iter()
            .collect();
        assert_eq!(piece.corners(), &want);
    }

    #[test]
    fn empty_piece_is_rejected() {
        assert_eq!(Piece::new(Vec::new()), Err(GameError::EmptyPiece));
    }

    #[test]
    fn orient_translates_from_location() {
        let piece = Piece::new(coords(&[(0, 0), (1, 0), (2, 0)])).unwrap();
        let shape = piece.orient(Orientation::new(Rotation::R270, false), Coord::new(0, 0));
        assert_eq!(shape.blocks, coords(&[(0, 0), (0, 1), (0, 2)]));

        let shifted = piece.orient(Orientation::default(), Coord::new(4, 5));
        assert_eq!(shifted.blocks, coords(&[(4, 5), (5, 5), (6, 5)]));
        assert!(shifted.corners.contains(&Coord::new(3, 4)));
        assert!(shifted.corners.contains(&Coord::new(7, 6)));

        // template untouched
        assert_eq!(piece.blocks(), coords(&[(0, 0), (1, 0), (2, 0)]).as_slice());
    }

    #[test]
    fn canonical_form_ignores_orientation() {
        let l = Piece::new(coords(&[(0, 0), (1, 0), (2, 0), (2, 1)])).unwrap();
        let mirrored = Piece::new(coords(&[(0, 0), (0, 1), (0, 2), (-1, 2)])).unwrap();
        let line = Piece::new(coords(&[(0, 0), (1, 0), (2, 0), (3, 0)])).unwrap();
        assert_eq!(l.canonical_form(), mirrored.canonical_form());
        assert_ne!(l.canonical_form(), line.canonical_form());
    }

    #[test]
    fn serializes_as_block_list() {
        let piece = Piece::new(coords(&[(0, 0), (1, 0)])).unwrap();
        let json = serde_json::to_string(&piece).unwrap();
        assert_eq!(json, r#"[{"x":0,"y":0},{"x":1,"y":0}]"#);

        let back: Piece = serde_json::from_str(&json).unwrap();
        assert_eq!(back, piece);
        assert!(serde_json::from_str::<Piece>("[]").is_err());
    }
}
