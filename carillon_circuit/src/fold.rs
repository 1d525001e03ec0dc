// Fold (snake) routing.
//
// When a lane has traveled its full span, the circuit folds back on itself:
// a fixed-length lateral bridge of wire carries the signal sideways, travel
// direction reverses, and the lane continues at a greater depth. Folding
// trades bounded width for unbounded depth, so arbitrarily long timelines
// fit in a fixed-width corridor.
//
// The bridge shape is fixed regardless of how far past the edge the cursor
// sits. The layout model only checks bounds at note boundaries, so the
// overshoot is exactly one step per excursion and the fixed bridge always
// reconnects.

use crate::config::CircuitConfig;
use crate::cursor::CursorState;
use crate::error::CompileError;
use crate::op::{Block, Coord, PlacementOp};

/// Emit the lateral bridge at the cursor, then take one step in the (already
/// reversed) travel direction and advance the lane depth.
///
/// The bridge spans depths `z - 1` through `z + jump_length - 2`, centered
/// one unit behind the lane line so it picks up the side wires.
pub fn emit_fold(
    ops: &mut Vec<PlacementOp>,
    cursor: &mut CursorState,
    config: &CircuitConfig,
    lane_y: i32,
) -> Result<(), CompileError> {
    for dz in 0..config.jump_length {
        let bridge_z = cursor
            .z
            .checked_add(dz - 1)
            .ok_or(CompileError::CapacityExceeded)?;
        ops.push(PlacementOp::new(
            Coord::new(cursor.x, lane_y - 1, bridge_z),
            Block::Support,
        ));
        ops.push(PlacementOp::new(
            Coord::new(cursor.x, lane_y, bridge_z),
            Block::Wire,
        ));
    }
    cursor.step()?;
    // Keep two units of depth headroom for the flip-side offsets.
    cursor.z = cursor
        .z
        .checked_add(config.fold_depth_step)
        .filter(|z| *z <= i32::MAX - 2)
        .ok_or(CompileError::CapacityExceeded)?;
    Ok(())
}
