// Per-note circuit emission.
//
// Every note gets the same 8-op micro-layout, anchored at the cursor:
//
//   line:        support + wire on the lane line
//   latch:       support + latch on the flip side
//   instruction: support + transmitter one unit past the latch
//   side wire:   support + wire opposite the latch
//
// Only coordinates and instruction parameters vary; the shape never does.
// The octave band comes from the pitch's range third, the tone from the
// shared palette table (with the top-of-range exception).

use crate::config::CircuitConfig;
use crate::cursor::CursorState;
use crate::op::{Block, Coord, PlacementOp};
use crate::palette::{ToneId, octave_band};

/// Emit a note's fixed micro-layout at the cursor. Returns the latch depth
/// so the caller can thread it into the following delay chains.
pub fn emit_note_shape(
    ops: &mut Vec<PlacementOp>,
    cursor: &CursorState,
    config: &CircuitConfig,
    lane_y: i32,
    pitch: u8,
) -> i32 {
    let latch_z = cursor.latch_z();
    let wire_z = cursor.wire_z();
    let link_z = cursor.link_z();
    let x = cursor.x;

    ops.push(PlacementOp::new(
        Coord::new(x, lane_y - 1, cursor.z),
        Block::Support,
    ));
    ops.push(PlacementOp::new(Coord::new(x, lane_y, cursor.z), Block::Wire));

    ops.push(PlacementOp::new(
        Coord::new(x, lane_y - 1, latch_z),
        Block::Support,
    ));
    ops.push(PlacementOp::new(
        Coord::new(x, lane_y, latch_z),
        Block::Latch {
            facing: cursor.latch_facing(),
        },
    ));

    ops.push(PlacementOp::new(
        Coord::new(x, lane_y - 1, link_z),
        Block::Support,
    ));
    ops.push(PlacementOp::new(
        Coord::new(x, lane_y, link_z),
        Block::Instruction {
            octave: octave_band(pitch),
            tone: ToneId::of_pitch(pitch, config.highest_pitch),
        },
    ));

    ops.push(PlacementOp::new(
        Coord::new(x, lane_y - 1, wire_z),
        Block::Support,
    ));
    ops.push(PlacementOp::new(Coord::new(x, lane_y, wire_z), Block::Wire));

    latch_z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{Facing, OctaveBand};

    #[test]
    fn every_note_is_exactly_eight_ops() {
        let config = CircuitConfig::default();
        for pitch in [42u8, 54, 60, 66, 78] {
            let cursor = CursorState::new(1);
            let mut ops = Vec::new();
            emit_note_shape(&mut ops, &cursor, &config, 3, pitch);
            assert_eq!(ops.len(), 8, "pitch {pitch}");
        }
    }

    #[test]
    fn unflipped_note_latches_south_of_the_line() {
        let config = CircuitConfig::default();
        let cursor = CursorState::new(1);
        let mut ops = Vec::new();
        let latch_z = emit_note_shape(&mut ops, &cursor, &config, 3, 60);

        assert_eq!(latch_z, -1);
        assert_eq!(ops[0], PlacementOp::new(Coord::new(1, 2, 0), Block::Support));
        assert_eq!(ops[1], PlacementOp::new(Coord::new(1, 3, 0), Block::Wire));
        assert_eq!(
            ops[3],
            PlacementOp::new(Coord::new(1, 3, -1), Block::Latch { facing: Facing::South })
        );
        assert_eq!(
            ops[5],
            PlacementOp::new(
                Coord::new(1, 3, -2),
                Block::Instruction {
                    octave: OctaveBand::Mid,
                    tone: ToneId::Semitone(0),
                }
            )
        );
        assert_eq!(ops[7], PlacementOp::new(Coord::new(1, 3, 1), Block::Wire));
    }

    #[test]
    fn flipped_note_mirrors_the_layout() {
        let config = CircuitConfig::default();
        let mut cursor = CursorState::new(4);
        cursor.flip = true;
        let mut ops = Vec::new();
        let latch_z = emit_note_shape(&mut ops, &cursor, &config, 3, 60);

        assert_eq!(latch_z, 1);
        assert_eq!(
            ops[3],
            PlacementOp::new(Coord::new(4, 3, 1), Block::Latch { facing: Facing::North })
        );
        assert_eq!(ops[5].pos, Coord::new(4, 3, 2));
        assert_eq!(ops[7].pos, Coord::new(4, 3, -1));
    }

    #[test]
    fn identical_pitches_get_identical_instruction_parameters() {
        let config = CircuitConfig::default();
        let mut a = Vec::new();
        let mut b = Vec::new();
        let mut cursor = CursorState::new(1);
        emit_note_shape(&mut a, &cursor, &config, 3, 71);
        cursor.x = 40;
        cursor.z = 25;
        cursor.flip = true;
        emit_note_shape(&mut b, &cursor, &config, 13, 71);
        assert_eq!(a[5].block, b[5].block);
    }
}
