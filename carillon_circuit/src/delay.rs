// Duration encoding.
//
// A duration of `T` ticks becomes a chain of delay elements whose values sum
// to `T`, each in `[1, max_delay]`. The decomposition is greedy — take
// `min(max_delay, remaining)` until nothing remains — and no other
// decomposition is permitted: downstream coordinates are derived 1:1 from
// the element count, so the chain length is part of the output contract.
//
// The chain advances the cursor one lateral step per element with no bounds
// check of its own. Folds are only evaluated at note boundaries, so a very
// long duration can carry the cursor past the span; this is a known
// limitation of the layout model, kept because changing it would change the
// op stream shape.

use crate::config::CircuitConfig;
use crate::cursor::CursorState;
use crate::error::CompileError;
use crate::op::{Block, Coord, PlacementOp};
use smallvec::SmallVec;

/// Greedily decompose `ticks` into delay values summing to `ticks`, each in
/// `[1, max_delay]`. Zero ticks decompose to an empty chain.
pub fn decompose(ticks: u32, max_delay: u32) -> SmallVec<[u32; 8]> {
    assert!(max_delay >= 1, "max_delay must be at least 1");
    let mut values = SmallVec::new();
    let mut remaining = ticks;
    while remaining > 0 {
        let delay = remaining.min(max_delay);
        values.push(delay);
        remaining -= delay;
    }
    values
}

/// Lay out the delay chain for `ticks` at the cursor, advancing it one step
/// per element. Each element is a support/delay pair on the lane line; when
/// a prior latch exists, a parallel support/wire pair runs at its depth so
/// the latch keeps a powered path alongside the chain.
pub fn emit_delay_chain(
    ops: &mut Vec<PlacementOp>,
    cursor: &mut CursorState,
    config: &CircuitConfig,
    lane_y: i32,
    ticks: u32,
) -> Result<(), CompileError> {
    for delay in decompose(ticks, config.max_delay) {
        ops.push(PlacementOp::new(
            Coord::new(cursor.x, lane_y - 1, cursor.z),
            Block::Support,
        ));
        #[expect(clippy::cast_possible_truncation)]
        let delay = delay as u8;
        ops.push(PlacementOp::new(
            Coord::new(cursor.x, lane_y, cursor.z),
            Block::DelayElement {
                facing: cursor.delay_facing(),
                delay,
            },
        ));
        if let Some(latch_z) = cursor.last_latch_z {
            ops.push(PlacementOp::new(
                Coord::new(cursor.x, lane_y - 1, latch_z),
                Block::Support,
            ));
            ops.push(PlacementOp::new(
                Coord::new(cursor.x, lane_y, latch_z),
                Block::Wire,
            ));
        }
        cursor.step()?;
    }
    Ok(())
}
