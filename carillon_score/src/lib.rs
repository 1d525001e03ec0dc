// Carillon score model and MIDI front-end.
//
// This crate owns the normalized timeline representation the circuit compiler
// consumes: per-voice lists of pitched, quantized note events. It also owns
// the only lossy step in the pipeline — decoding Standard MIDI Files into
// beat-domain notes and snapping them onto the tick grid.
//
// Architecture:
// - score.rs: `NoteEvent` / `Voice` / `Score`, the normalized timeline model
// - midi.rs: SMF decoding (tempo map, note pairing), pitch filtering,
//   quantization, and `load_score`, the one entry point the binary calls
//
// Everything downstream of `load_score` is deterministic: the same files and
// options always produce the same `Score`, bit for bit.

pub mod midi;
pub mod score;
