// The normalized timeline: what the circuit compiler actually consumes.
//
// A `Score` is a set of independent voices, each an onset-ordered list of
// quantized `NoteEvent`s. All times are in ticks — the grid produced by
// dividing beats by the configured note unit. Decoding and quantization live
// in `midi.rs`; nothing here touches files or floating point.
//
// Voices never share state. Each is laid out at its own vertical offset by
// the compiler, so the model imposes no ordering or alignment between them.

use serde::{Deserialize, Serialize};

/// One note on the quantized grid.
///
/// `end_tick >= start_tick` always holds for normalized input; zero-length
/// notes are legal and receive a minimum one-tick duration when encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI pitch number, already filtered to the supported range.
    pub pitch: u8,
    /// Onset, in ticks from the start of the piece.
    pub start_tick: u32,
    /// Release, in ticks from the start of the piece.
    pub end_tick: u32,
}

impl NoteEvent {
    pub const fn new(pitch: u8, start_tick: u32, end_tick: u32) -> Self {
        Self {
            pitch,
            start_tick,
            end_tick,
        }
    }

    pub fn duration_ticks(&self) -> u32 {
        self.end_tick.saturating_sub(self.start_tick)
    }
}

/// One independent timeline of notes, in chronological onset order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    /// Where the voice came from (`file:track:channel`) — reporting only,
    /// never used by the compiler.
    pub label: String,
    pub notes: Vec<NoteEvent>,
}

impl Voice {
    pub fn new(label: impl Into<String>, notes: Vec<NoteEvent>) -> Self {
        Self {
            label: label.into(),
            notes,
        }
    }
}

/// The normalizer's complete output: every in-range voice plus the raster
/// width the piano roll should use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub voices: Vec<Voice>,
    /// Piano-roll width in ticks, computed from the latest unquantized note
    /// end so trailing partial ticks still get a column.
    pub width_ticks: u32,
}

impl Score {
    /// Total note count across all voices.
    pub fn note_count(&self) -> usize {
        self.voices.iter().map(|v| v.notes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_of_zero_length_note_is_zero() {
        let note = NoteEvent::new(60, 8, 8);
        assert_eq!(note.duration_ticks(), 0);
    }

    #[test]
    fn score_serialization_roundtrip() {
        let score = Score {
            voices: vec![Voice::new(
                "song.mid:0:0",
                vec![NoteEvent::new(60, 0, 16), NoteEvent::new(64, 16, 24)],
            )],
            width_ticks: 24,
        };
        let json = serde_json::to_string(&score).unwrap();
        let restored: Score = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, score);
        assert_eq!(restored.note_count(), 2);
    }
}
