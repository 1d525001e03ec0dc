// The per-voice compile driver and the multi-voice entry point.
//
// Per note, in order: fill the silence gap with a delay chain, evaluate the
// fold check (note boundaries only), route a pending fold, lay the fixed
// note shape, then encode the note's held duration. After the last note a
// trailing cleanup segment closes the lane so the final note's signal has a
// terminating path.
//
// Voices are fully independent — each gets a fresh cursor and its own lane
// height — so the entry point maps them through rayon and concatenates the
// results in voice order. Parallelism is a pure throughput optimization;
// the output is byte-identical to the sequential order.
//
// **Critical constraint: determinism.** No clocks, no randomness, no
// unordered iteration anywhere on this path.

use crate::config::CircuitConfig;
use crate::cursor::CursorState;
use crate::delay::emit_delay_chain;
use crate::emit::emit_note_shape;
use crate::error::CompileError;
use crate::fold::emit_fold;
use crate::op::{Block, Coord, PlacementOp};
use carillon_score::score::Voice;
use rayon::prelude::*;

/// Compile every voice into one flat op list, voices in input order, each at
/// its own lane height.
pub fn compile(voices: &[Voice], config: &CircuitConfig) -> Result<Vec<PlacementOp>, CompileError> {
    assert!(
        config.max_delay >= 1 && config.max_delay <= u32::from(u8::MAX),
        "max_delay must fit a delay element"
    );
    assert!(config.jump_length >= 1, "jump_length must be at least 1");

    let per_voice: Vec<Vec<PlacementOp>> = voices
        .par_iter()
        .enumerate()
        .map(|(index, voice)| compile_voice(voice, index, config))
        .collect::<Result<_, _>>()?;
    Ok(per_voice.into_iter().flatten().collect())
}

/// Compile one voice. `index` selects the lane height and names the voice in
/// errors.
pub fn compile_voice(
    voice: &Voice,
    index: usize,
    config: &CircuitConfig,
) -> Result<Vec<PlacementOp>, CompileError> {
    validate_voice(voice, index, config)?;
    let lane_y = lane_height(index, config)?;

    let mut cursor = CursorState::new(config.start_x);
    let mut ops = Vec::new();

    for note in &voice.notes {
        // Silence between the previous note's end and this onset, halved
        // onto the delay grid.
        let gap_ticks = note.start_tick.saturating_sub(cursor.last_end_tick) / 2;
        emit_delay_chain(&mut ops, &mut cursor, config, lane_y, gap_ticks)?;

        // Fold check, note boundaries only. The out-of-bounds latch keeps a
        // single excursion from folding twice.
        if !cursor.first_note
            && !cursor.pending_fold
            && !cursor.stuck_out_of_bounds
            && cursor.out_of_bounds(config.span)
        {
            cursor.pending_fold = true;
            cursor.stuck_out_of_bounds = true;
            cursor.direction = -cursor.direction;
        }
        if cursor.pending_fold {
            emit_fold(&mut ops, &mut cursor, config, lane_y)?;
            cursor.pending_fold = false;
        }
        if !cursor.out_of_bounds(config.span) {
            cursor.stuck_out_of_bounds = false;
        }

        let latch_z = emit_note_shape(&mut ops, &cursor, config, lane_y, note.pitch);
        cursor.last_latch_z = Some(latch_z);
        cursor.flip = !cursor.flip;
        cursor.step()?;

        // The held duration, halved like the gap, with a one-tick floor so
        // zero-length notes still occupy the lane.
        let held_ticks = ((note.end_tick - note.start_tick) / 2).max(1);
        emit_delay_chain(&mut ops, &mut cursor, config, lane_y, held_ticks)?;

        cursor.last_end_tick = note.end_tick;
        cursor.first_note = false;
    }

    emit_cleanup(&mut ops, &cursor, lane_y);
    Ok(ops)
}

/// Close the lane after the last note: support/wire pairs on the line and on
/// both flip sides, at whatever position and flip the last note left behind.
fn emit_cleanup(ops: &mut Vec<PlacementOp>, cursor: &CursorState, lane_y: i32) {
    for z in [cursor.z, cursor.wire_z(), cursor.latch_z()] {
        ops.push(PlacementOp::new(
            Coord::new(cursor.x, lane_y - 1, z),
            Block::Support,
        ));
        ops.push(PlacementOp::new(Coord::new(cursor.x, lane_y, z), Block::Wire));
    }
}

/// Height of a voice's wire plane: a pure function of its index.
fn lane_height(index: usize, config: &CircuitConfig) -> Result<i32, CompileError> {
    let index = i32::try_from(index).map_err(|_| CompileError::CapacityExceeded)?;
    index
        .checked_mul(config.voice_spacing)
        .and_then(|offset| offset.checked_add(config.base_height))
        .ok_or(CompileError::CapacityExceeded)
}

/// Fail fast on contract violations instead of emitting wrong geometry.
fn validate_voice(voice: &Voice, index: usize, config: &CircuitConfig) -> Result<(), CompileError> {
    if voice.notes.is_empty() {
        return Err(CompileError::EmptyVoice { voice: index });
    }
    let mut last_start = 0u32;
    for note in &voice.notes {
        if note.pitch < config.lowest_pitch || note.pitch > config.highest_pitch {
            return Err(CompileError::InvalidTimeline {
                voice: index,
                detail: format!(
                    "pitch {} outside [{}, {}]",
                    note.pitch, config.lowest_pitch, config.highest_pitch
                ),
            });
        }
        if note.end_tick < note.start_tick {
            return Err(CompileError::InvalidTimeline {
                voice: index,
                detail: format!(
                    "note at tick {} ends before it starts ({} < {})",
                    note.start_tick, note.end_tick, note.start_tick
                ),
            });
        }
        if note.start_tick < last_start {
            return Err(CompileError::InvalidTimeline {
                voice: index,
                detail: format!(
                    "onsets out of order ({} after {})",
                    note.start_tick, last_start
                ),
            });
        }
        last_start = note.start_tick;
    }
    Ok(())
}
