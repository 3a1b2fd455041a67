// transform.rs - Orientation of patterns before placement

use crate::matrix::CellMatrix;

/// Clockwise rotation in quarter-turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Angle {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Angle {
    pub const ALL: [Angle; 4] = [Angle::Deg0, Angle::Deg90, Angle::Deg180, Angle::Deg270];

    /// Snaps any integer to the multiple of 90 at or below it within `[0, 360)`.
    pub fn from_degrees(degrees: i64) -> Self {
        match degrees.rem_euclid(360) / 90 {
            0 => Angle::Deg0,
            1 => Angle::Deg90,
            2 => Angle::Deg180,
            _ => Angle::Deg270,
        }
    }

    pub fn degrees(self) -> u32 {
        self.quarter_turns() * 90
    }

    pub fn quarter_turns(self) -> u32 {
        match self {
            Angle::Deg0 => 0,
            Angle::Deg90 => 1,
            Angle::Deg180 => 2,
            Angle::Deg270 => 3,
        }
    }
}

/// Mirror applied after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flip {
    #[default]
    None,
    /// Top-bottom mirror: the row order is reversed.
    Horizontal,
    /// Left-right mirror: the column order is reversed.
    Vertical,
}

impl Flip {
    /// `HORIZONTAL` and `VERTICAL` select an axis; any other word clears the flip.
    pub fn from_keyword(word: &str) -> Self {
        match word.trim() {
            "HORIZONTAL" => Flip::Horizontal,
            "VERTICAL" => Flip::Vertical,
            _ => Flip::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Orientation {
    pub angle: Angle,
    pub flip: Flip,
}

impl Orientation {
    pub fn new(angle: Angle, flip: Flip) -> Self {
        Self { angle, flip }
    }
}

/// Rotates `canonical` clockwise by `angle`, then applies `flip`.
pub fn transform(canonical: &CellMatrix, orientation: Orientation) -> CellMatrix {
    let mut out = canonical.clone();
    for _ in 0..orientation.angle.quarter_turns() {
        out = out.rotated_cw();
    }
    match orientation.flip {
        Flip::None => out,
        Flip::Horizontal => out.flipped_rows(),
        Flip::Vertical => out.flipped_cols(),
    }
}
