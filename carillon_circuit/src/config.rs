// Compiler configuration.
//
// All tunable layout parameters live here in `CircuitConfig` — the compiler
// itself carries no magic numbers, so tests and repeated runs can vary the
// geometry independently. `Default` holds the reference layout. The struct is
// serde-derived and can be loaded from JSON.
//
// **Critical constraint: determinism.** Config values feed directly into
// layout decisions. Identical configs and identical scores must produce
// identical op streams.

use serde::{Deserialize, Serialize};

/// Every tunable input to the circuit compiler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitConfig {
    /// Lowest pitch the circuit can voice.
    pub lowest_pitch: u8,
    /// Highest pitch the circuit can voice. This pitch gets the reserved
    /// tone instead of its chromatic table entry.
    pub highest_pitch: u8,
    /// Bounded lateral span of a lane. Reaching either edge at a note
    /// boundary triggers a fold.
    pub span: i32,
    /// Largest delay value a single delay element can carry.
    pub max_delay: u32,
    /// Number of wire/support pairs in a fold's lateral bridge.
    pub jump_length: i32,
    /// How far a fold advances the lane in depth.
    pub fold_depth_step: i32,
    /// Height of the first voice's wire plane.
    pub base_height: i32,
    /// Vertical distance between consecutive voices' wire planes.
    pub voice_spacing: i32,
    /// Lateral position where every voice starts.
    pub start_x: i32,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            lowest_pitch: 42,
            highest_pitch: 78,
            span: 64,
            max_delay: 4,
            jump_length: 7,
            fold_depth_step: 5,
            base_height: 3,
            voice_spacing: 10,
            start_x: 1,
        }
    }
}

impl CircuitConfig {
    /// Number of distinct pitches in the supported range, inclusive.
    pub fn pitch_range(&self) -> u32 {
        u32::from(self.highest_pitch - self.lowest_pitch) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_layout() {
        let config = CircuitConfig::default();
        assert_eq!(config.lowest_pitch, 42);
        assert_eq!(config.highest_pitch, 78);
        assert_eq!(config.span, 64);
        assert_eq!(config.max_delay, 4);
        assert_eq!(config.jump_length, 7);
        assert_eq!(config.fold_depth_step, 5);
        assert_eq!(config.pitch_range(), 37);
    }

    #[test]
    fn config_serialization_roundtrip() {
        let config = CircuitConfig {
            span: 32,
            voice_spacing: 6,
            ..CircuitConfig::default()
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored: CircuitConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn config_loads_from_json_string() {
        let json = r#"{
            "lowest_pitch": 48,
            "highest_pitch": 72,
            "span": 48,
            "max_delay": 4,
            "jump_length": 7,
            "fold_depth_step": 5,
            "base_height": 3,
            "voice_spacing": 8,
            "start_x": 1
        }"#;
        let config: CircuitConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.lowest_pitch, 48);
        assert_eq!(config.span, 48);
        assert_eq!(config.pitch_range(), 25);
    }
}
