// Per-voice cursor state.
//
// One `CursorState` is created per voice, threaded through gap filling, fold
// routing, note emission, and duration encoding, then discarded after the
// trailing cleanup. Nothing about it escapes the voice — voices share no
// state, which is what makes per-voice compilation embarrassingly parallel.
//
// The flip flag alternates every note and decides which side of the lane
// receives the latch versus the side wire; the fold latches
// (`pending_fold` / `stuck_out_of_bounds`) guarantee at most one fold per
// out-of-bounds excursion.

use crate::error::CompileError;
use crate::op::Facing;
use serde::{Deserialize, Serialize};

/// Mutable layout state for one voice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    /// Lateral position along the lane.
    pub x: i32,
    /// Depth of the lane's wire line.
    pub z: i32,
    /// Travel direction, +1 or -1. Reversed by each fold.
    pub direction: i32,
    /// Alternating side flag; toggled after every note.
    pub flip: bool,
    /// A fold has been scheduled for this note boundary.
    pub pending_fold: bool,
    /// Latched while the cursor sits outside the span, so one excursion
    /// triggers exactly one fold.
    pub stuck_out_of_bounds: bool,
    /// Depth of the previous note's latch, if any — delay chains run a
    /// parallel wire at this depth.
    pub last_latch_z: Option<i32>,
    /// End tick of the previous note; gaps are measured from here.
    pub last_end_tick: u32,
    /// True until the first note has been laid out. The first note never
    /// triggers a fold.
    pub first_note: bool,
}

impl CursorState {
    pub fn new(start_x: i32) -> Self {
        Self {
            x: start_x,
            z: 0,
            direction: 1,
            flip: false,
            pending_fold: false,
            stuck_out_of_bounds: false,
            last_latch_z: None,
            last_end_tick: 0,
            first_note: true,
        }
    }

    /// Advance one lateral step in the travel direction.
    pub fn step(&mut self) -> Result<(), CompileError> {
        self.x = self
            .x
            .checked_add(self.direction)
            .ok_or(CompileError::CapacityExceeded)?;
        Ok(())
    }

    /// Whether the cursor has reached either edge of the lane.
    pub fn out_of_bounds(&self, span: i32) -> bool {
        self.x >= span || self.x <= 0
    }

    /// Facing of delay elements laid in the current travel direction.
    pub fn delay_facing(&self) -> Facing {
        if self.direction > 0 {
            Facing::West
        } else {
            Facing::East
        }
    }

    /// Depth of the current note's latch.
    pub fn latch_z(&self) -> i32 {
        if self.flip { self.z + 1 } else { self.z - 1 }
    }

    /// Depth of the current note's side wire, opposite the latch.
    pub fn wire_z(&self) -> i32 {
        if self.flip { self.z - 1 } else { self.z + 1 }
    }

    /// Depth of the current note's instruction, one past the latch side.
    pub fn link_z(&self) -> i32 {
        if self.flip { self.z + 2 } else { self.z - 2 }
    }

    /// Facing of the current note's latch.
    pub fn latch_facing(&self) -> Facing {
        if self.flip {
            Facing::North
        } else {
            Facing::South
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cursor_matches_lane_start() {
        let cursor = CursorState::new(1);
        assert_eq!(cursor.x, 1);
        assert_eq!(cursor.z, 0);
        assert_eq!(cursor.direction, 1);
        assert!(!cursor.flip);
        assert!(cursor.first_note);
        assert_eq!(cursor.last_latch_z, None);
    }

    #[test]
    fn flip_mirrors_every_derived_depth() {
        let mut cursor = CursorState::new(1);
        cursor.z = 10;
        assert_eq!(cursor.latch_z(), 9);
        assert_eq!(cursor.wire_z(), 11);
        assert_eq!(cursor.link_z(), 8);
        assert_eq!(cursor.latch_facing(), Facing::South);

        cursor.flip = true;
        assert_eq!(cursor.latch_z(), 11);
        assert_eq!(cursor.wire_z(), 9);
        assert_eq!(cursor.link_z(), 12);
        assert_eq!(cursor.latch_facing(), Facing::North);
    }

    #[test]
    fn step_follows_direction() {
        let mut cursor = CursorState::new(1);
        cursor.step().unwrap();
        assert_eq!(cursor.x, 2);
        cursor.direction = -1;
        cursor.step().unwrap();
        cursor.step().unwrap();
        assert_eq!(cursor.x, 0);
    }

    #[test]
    fn step_reports_overflow_instead_of_wrapping() {
        let mut cursor = CursorState::new(i32::MAX);
        assert_eq!(cursor.step(), Err(CompileError::CapacityExceeded));
    }

    #[test]
    fn bounds_check_includes_both_edges() {
        let mut cursor = CursorState::new(1);
        assert!(!cursor.out_of_bounds(64));
        cursor.x = 64;
        assert!(cursor.out_of_bounds(64));
        cursor.x = 0;
        assert!(cursor.out_of_bounds(64));
        cursor.x = 63;
        assert!(!cursor.out_of_bounds(64));
    }

    #[test]
    fn delay_facing_tracks_direction() {
        let mut cursor = CursorState::new(1);
        assert_eq!(cursor.delay_facing(), Facing::West);
        cursor.direction = -1;
        assert_eq!(cursor.delay_facing(), Facing::East);
    }
}
