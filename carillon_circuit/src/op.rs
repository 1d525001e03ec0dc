// The structured output model: placement operations.
//
// The compiler never formats strings. It appends `PlacementOp` values —
// a coordinate plus a tagged block variant — to a growing sequence, and
// `mcfunction.rs` turns that sequence into text at the boundary. This keeps
// the op stream unit-testable on its own and the serialization swappable.
//
// Op order is significant: later placements depend electrically and
// spatially on earlier ones, and consumers replay the list verbatim.

use crate::palette::ToneId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the circuit grid, relative to the run origin.
///
/// Axes follow the layout convention:
/// - X: lateral travel along the lane
/// - Y: up; each voice's wire plane sits at its own height
/// - Z: depth; folds advance here, latches sit one unit to either side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Orientation of a placed element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    North,
    South,
    East,
    West,
    Up,
}

impl Facing {
    pub fn id(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::South => "south",
            Facing::East => "east",
            Facing::West => "west",
            Facing::Up => "up",
        }
    }
}

/// Octave band an instruction transmits on, selected by pitch range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OctaveBand {
    Low,
    Mid,
    High,
}

impl OctaveBand {
    /// The block id carried on the instruction's first frequency slot.
    pub fn block_id(self) -> &'static str {
        match self {
            OctaveBand::Low => "copper_block",
            OctaveBand::Mid => "gold_block",
            OctaveBand::High => "iron_block",
        }
    }
}

/// What gets placed at a coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    /// Backing block beneath every functional element.
    Support,
    /// Plain signal wire.
    Wire,
    /// One link in a duration chain, delaying the pulse by `delay` ticks.
    DelayElement { facing: Facing, delay: u8 },
    /// Holds a note's signal until the next pulse releases it.
    Latch { facing: Facing },
    /// Per-note transmitter, parameterized by octave band and tone.
    Instruction { octave: OctaveBand, tone: ToneId },
}

/// One placement: a block at a coordinate. Immutable once appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOp {
    pub pos: Coord,
    pub block: Block,
}

impl PlacementOp {
    pub const fn new(pos: Coord, block: Block) -> Self {
        Self { pos, block }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_display() {
        assert_eq!(Coord::new(3, -1, 0).to_string(), "(3, -1, 0)");
    }

    #[test]
    fn op_serialization_roundtrip() {
        let op = PlacementOp::new(
            Coord::new(1, 3, -2),
            Block::DelayElement {
                facing: Facing::West,
                delay: 4,
            },
        );
        let json = serde_json::to_string(&op).unwrap();
        let restored: PlacementOp = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, op);
    }
}
