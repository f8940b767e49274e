// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rotation and flip transforms applied to piece offsets

use crate::Coord;
use serde::{Deserialize, Serialize};

/// Clockwise rotation in quarter turns.
///
/// Serialized as the number of quarter turns; any integer is accepted on
/// input and reduced modulo 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Reduce an arbitrary number of quarter turns to `[0, 3]`
    pub fn normalize(quarter_turns: i64) -> Self {
        match quarter_turns.rem_euclid(4) {
            0 => Rotation::R0,
            1 => Rotation::R90,
            2 => Rotation::R180,
            _ => Rotation::R270,
        }
    }

    /// Number of clockwise quarter turns
    pub fn quarter_turns(self) -> u8 {
        self as u8
    }
}

impl From<i64> for Rotation {
    fn from(value: i64) -> Self {
        Rotation::normalize(value)
    }
}

impl From<Rotation> for u8 {
    fn from(value: Rotation) -> Self {
        value.quarter_turns()
    }
}

/// Rotate a coordinate 90 degrees clockwise around the origin
pub fn rotate_coord(c: Coord) -> Coord {
    Coord::new(c.y, c.x.saturating_neg())
}

/// Mirror a coordinate across the x axis
pub fn flip_coord(c: Coord) -> Coord {
    Coord::new(c.x, c.y.saturating_neg())
}

/// How a piece template is turned before placement. Rotation applies first,
/// then the optional flip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Orientation {
    pub rotation: Rotation,
    pub flip: bool,
}

impl Orientation {
    pub fn new(rotation: Rotation, flip: bool) -> Self {
        Self { rotation, flip }
    }

    /// All eight rotation/flip combinations
    pub fn all() -> impl Iterator<Item = Orientation> {
        [false, true].into_iter().flat_map(|flip| {
            Rotation::ALL
                .into_iter()
                .map(move |rotation| Orientation::new(rotation, flip))
        })
    }

    /// Apply this orientation to a single offset
    pub fn transform(self, c: Coord) -> Coord {
        let mut c = c;
        for _ in 0..self.rotation.quarter_turns() {
            c = rotate_coord(c);
        }
        if self.flip {
            c = flip_coord(c);
        }
        c
    }

    /// Apply this orientation to every offset, producing a new sequence
    pub fn transform_all(self, coords: &[Coord]) -> Vec<Coord> {
        coords.iter().map(|&c| self.transform(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_normalize() {
        assert_eq!(Rotation::normalize(2), Rotation::R180);
        assert_eq!(Rotation::normalize(2 + 4), Rotation::R180);
        assert_eq!(Rotation::normalize(-1), Rotation::R270);
        assert_eq!(Rotation::normalize(7).quarter_turns(), 3);
    }

    #[test]
    fn rotate_cycle() {
        let steps = [
            (Coord::new(0, 0), Coord::new(0, 0)),
            (Coord::new(1, 2), Coord::new(2, -1)),
            (Coord::new(2, -1), Coord::new(-1, -2)),
            (Coord::new(-1, -2), Coord::new(-2, 1)),
            (Coord::new(-2, 1), Coord::new(1, 2)),
        ];
        for (input, want) in steps {
            assert_eq!(rotate_coord(input), want, "rotating {}", input);
        }
    }

    #[test]
    fn flip_mirrors_columns() {
        assert_eq!(flip_coord(Coord::new(0, 0)), Coord::new(0, 0));
        assert_eq!(flip_coord(Coord::new(1, 2)), Coord::new(1, -2));
        assert_eq!(flip_coord(Coord::new(-1, -2)), Coord::new(-1, 2));
    }

    #[test]
    fn transform_rotates_before_flipping() {
        let o = Orientation::new(Rotation::R90, true);
        // rotate (1, 0) -> (0, -1), flip -> (0, 1)
        assert_eq!(o.transform(Coord::new(1, 0)), Coord::new(0, 1));

        let identity = Orientation::default();
        let cs = vec![
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(1, 1),
            Coord::new(2, 1),
        ];
        assert_eq!(identity.transform_all(&cs), cs);
    }

    #[test]
    fn all_orientations_are_distinct() {
        let all: Vec<_> = Orientation::all().collect();
        assert_eq!(all.len(), 8);
        for (i, a) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn rotation_serializes_as_quarter_turns() {
        let json = serde_json::to_string(&Orientation::new(Rotation::R270, false)).unwrap();
        assert_eq!(json, r#"{"rotation":3,"flip":false}"#);

        let o: Orientation = serde_json::from_str(r#"{"rotation":6,"flip":true}"#).unwrap();
        assert_eq!(o, Orientation::new(Rotation::R180, true));
    }
}
