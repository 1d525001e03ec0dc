// The shared tone table.
//
// Each of the 12 chromatic pitch classes has exactly one identity: the block
// transmitted on an instruction's tone slot and the hue painted in the piano
// roll. Both come from the single `TONE_TABLE` below — the renderer and the
// emitter must never drift apart, so neither carries its own copy.
//
// The top of the supported pitch range is special-cased to a reserved white
// tone: the receiving circuit distinguishes it from the pitch class it would
// otherwise share a tone with.

use crate::op::OctaveBand;
use serde::{Deserialize, Serialize};

/// One pitch class's shared identity across circuit and raster output.
#[derive(Clone, Copy, Debug)]
pub struct ToneEntry {
    /// Block id transmitted on the instruction's tone slot.
    pub block: &'static str,
    /// Hue used for this pitch class in the piano roll.
    pub rgb: (u8, u8, u8),
}

/// Pitch classes C through B, in semitone order.
pub const TONE_TABLE: [ToneEntry; 12] = [
    ToneEntry { block: "light_blue_wool", rgb: (173, 216, 230) }, // C
    ToneEntry { block: "blue_wool", rgb: (0, 0, 139) },           // C#
    ToneEntry { block: "blue_terracotta", rgb: (75, 0, 130) },    // D
    ToneEntry { block: "purple_wool", rgb: (128, 0, 128) },       // D#
    ToneEntry { block: "magenta_wool", rgb: (255, 0, 255) },      // E
    ToneEntry { block: "pink_wool", rgb: (255, 192, 203) },       // F
    ToneEntry { block: "red_wool", rgb: (255, 0, 0) },            // F#
    ToneEntry { block: "orange_wool", rgb: (255, 165, 0) },       // G
    ToneEntry { block: "yellow_wool", rgb: (255, 255, 0) },       // G#
    ToneEntry { block: "lime_wool", rgb: (0, 255, 0) },           // A
    ToneEntry { block: "green_wool", rgb: (0, 128, 0) },          // A#
    ToneEntry { block: "cyan_wool", rgb: (0, 255, 255) },         // B
];

/// Tone block for the reserved top-of-range pitch.
pub const RESERVED_TONE_BLOCK: &str = "white_wool";

/// An instruction's tone parameter: a chromatic table entry, or the reserved
/// tone for the highest supported pitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneId {
    /// Index into `TONE_TABLE`, always in `0..12`.
    Semitone(u8),
    Reserved,
}

impl ToneId {
    /// Select the tone for a pitch. A pure function: the same pitch maps to
    /// the same tone everywhere in every voice.
    pub fn of_pitch(pitch: u8, highest_pitch: u8) -> Self {
        if pitch == highest_pitch {
            ToneId::Reserved
        } else {
            ToneId::Semitone(pitch % 12)
        }
    }

    /// The block id transmitted for this tone.
    pub fn block_id(self) -> &'static str {
        match self {
            ToneId::Semitone(semitone) => TONE_TABLE[usize::from(semitone) % 12].block,
            ToneId::Reserved => RESERVED_TONE_BLOCK,
        }
    }
}

/// Octave band for a pitch: low/mid/high thirds of the supported range.
pub fn octave_band(pitch: u8) -> OctaveBand {
    if pitch < 54 {
        OctaveBand::Low
    } else if pitch < 66 {
        OctaveBand::Mid
    } else {
        OctaveBand::High
    }
}

/// Raster hue for a pitch, from the shared table.
pub fn pitch_rgb(pitch: u8) -> (u8, u8, u8) {
    TONE_TABLE[usize::from(pitch % 12)].rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_is_a_pure_function_of_pitch() {
        for pitch in 42..=77 {
            assert_eq!(
                ToneId::of_pitch(pitch, 78),
                ToneId::Semitone(pitch % 12),
                "pitch {pitch}"
            );
            assert_eq!(ToneId::of_pitch(pitch, 78), ToneId::of_pitch(pitch, 78));
        }
    }

    #[test]
    fn highest_pitch_gets_the_reserved_tone() {
        assert_eq!(ToneId::of_pitch(78, 78), ToneId::Reserved);
        assert_eq!(ToneId::of_pitch(78, 78).block_id(), "white_wool");
        // 78 % 12 == 6 would otherwise collide with F#.
        assert_eq!(ToneId::of_pitch(66, 78).block_id(), "red_wool");
    }

    #[test]
    fn octave_bands_split_at_54_and_66() {
        assert_eq!(octave_band(42), OctaveBand::Low);
        assert_eq!(octave_band(53), OctaveBand::Low);
        assert_eq!(octave_band(54), OctaveBand::Mid);
        assert_eq!(octave_band(65), OctaveBand::Mid);
        assert_eq!(octave_band(66), OctaveBand::High);
        assert_eq!(octave_band(78), OctaveBand::High);
    }

    #[test]
    fn raster_hue_and_tone_block_come_from_the_same_entry() {
        for pitch in 42u8..=77 {
            let entry = &TONE_TABLE[usize::from(pitch % 12)];
            assert_eq!(pitch_rgb(pitch), entry.rgb);
            assert_eq!(ToneId::of_pitch(pitch, 78).block_id(), entry.block);
        }
    }
}
