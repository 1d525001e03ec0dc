// Standard MIDI File decoding and timeline normalization.
//
// Turns raw SMF bytes into the beat domain and then onto the tick grid:
//
//   SMF ticks --(tempo map)--> seconds --(first tempo)--> beats
//       --(note unit, floor)--> ticks
//
// The beat is defined by the file's *first* tempo event (120 BPM when a file
// carries none); later tempo events still stretch wall-clock time through the
// tempo map, so rubato sections compress or expand on the grid exactly as
// they sound. One voice is produced per (track, channel) pair that keeps at
// least one note inside the configured pitch range.
//
// Uses the `midly` crate for SMF parsing. Note pairing follows running
// practice: a NoteOn with velocity 0 is a NoteOff, a re-struck pitch closes
// the previous note, and notes still sounding at end-of-track are closed at
// the track's final tick.

use crate::score::{NoteEvent, Score, Voice};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default tempo when a file has no tempo event: 120 BPM.
const DEFAULT_USEC_PER_BEAT: u32 = 500_000;

/// Ticks-per-beat fallback for files without metrical timing.
const DEFAULT_TICKS_PER_BEAT: u16 = 480;

/// Normalization parameters, supplied by the caller.
#[derive(Clone, Copy, Debug)]
pub struct ScoreOptions {
    /// Lowest pitch kept after filtering.
    pub lowest_pitch: u8,
    /// Highest pitch kept after filtering.
    pub highest_pitch: u8,
    /// Quantization grid in beats per tick. Must be positive.
    pub note_unit: f64,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            lowest_pitch: 42,
            highest_pitch: 78,
            note_unit: 0.25,
        }
    }
}

/// Decoding failures, with enough context to name the offending file.
#[derive(Debug)]
pub enum ScoreError {
    /// The file could not be read at all.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The bytes were not a parseable Standard MIDI File.
    Malformed { path: PathBuf, detail: String },
    /// No voice kept any note after pitch filtering.
    NoVoices,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ScoreError::Malformed { path, detail } => {
                write!(f, "{} is not a valid MIDI file: {detail}", path.display())
            }
            ScoreError::NoVoices => {
                write!(f, "no voice has any note in the supported pitch range")
            }
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A decoded note still in the beat domain, before filtering/quantization.
#[derive(Clone, Copy, Debug)]
pub struct BeatNote {
    pub pitch: u8,
    pub start_beats: f64,
    pub end_beats: f64,
}

/// All notes of one (track, channel) pair, in onset order.
#[derive(Clone, Debug)]
pub struct BeatVoice {
    pub label: String,
    pub notes: Vec<BeatNote>,
}

/// A tempo event on the absolute SMF tick axis.
#[derive(Clone, Copy, Debug)]
struct TempoEvent {
    tick: u64,
    usec_per_beat: u32,
}

/// A paired note in the SMF tick domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct RawNote {
    on_tick: u64,
    off_tick: u64,
    pitch: u8,
}

/// Decode one SMF into beat-domain voices, one per (track, channel) pair
/// that contains any note. No pitch filtering happens here.
pub fn decode_midi(bytes: &[u8], source: &Path) -> Result<Vec<BeatVoice>, ScoreError> {
    let smf = midly::Smf::parse(bytes).map_err(|e| ScoreError::Malformed {
        path: source.to_path_buf(),
        detail: e.to_string(),
    })?;

    let ticks_per_beat = match smf.header.timing {
        midly::Timing::Metrical(tpb) => tpb.as_int(),
        // SMPTE timing is rare in song files; fall back to the metrical default.
        _ => DEFAULT_TICKS_PER_BEAT,
    };

    // Collect the tempo map across all tracks, then pair notes per track.
    let mut tempo_map: Vec<TempoEvent> = Vec::new();
    let mut raw_voices: BTreeMap<(usize, u8), Vec<RawNote>> = BTreeMap::new();

    for (track_index, track) in smf.tracks.iter().enumerate() {
        let mut current_tick: u64 = 0;
        // Sounding notes: (channel, pitch) -> onset tick.
        let mut active: BTreeMap<(u8, u8), u64> = BTreeMap::new();

        for event in track {
            current_tick += u64::from(event.delta.as_int());

            if let midly::TrackEventKind::Meta(midly::MetaMessage::Tempo(t)) = event.kind {
                tempo_map.push(TempoEvent {
                    tick: current_tick,
                    usec_per_beat: t.as_int(),
                });
            }

            if let midly::TrackEventKind::Midi { channel, message } = event.kind {
                let ch = channel.as_int();
                match message {
                    midly::MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                        let pitch = key.as_int();
                        // A re-struck pitch closes the previous note first.
                        if let Some(on_tick) = active.remove(&(ch, pitch)) {
                            push_raw(&mut raw_voices, track_index, ch, pitch, on_tick, current_tick);
                        }
                        active.insert((ch, pitch), current_tick);
                    }
                    // NoteOn with velocity 0 is a NoteOff by convention.
                    midly::MidiMessage::NoteOn { key, .. }
                    | midly::MidiMessage::NoteOff { key, .. } => {
                        let pitch = key.as_int();
                        if let Some(on_tick) = active.remove(&(ch, pitch)) {
                            push_raw(&mut raw_voices, track_index, ch, pitch, on_tick, current_tick);
                        }
                    }
                    _ => {}
                }
            }
        }

        // Close anything still sounding at the track's final tick.
        for ((ch, pitch), on_tick) in active {
            push_raw(&mut raw_voices, track_index, ch, pitch, on_tick, current_tick);
        }
    }

    tempo_map.sort_by_key(|t| t.tick);
    tempo_map.dedup_by_key(|t| t.tick);

    // The first tempo event defines what "a beat" means for the whole file.
    let first_usec = tempo_map
        .first()
        .map_or(DEFAULT_USEC_PER_BEAT, |t| t.usec_per_beat);
    let seconds_per_beat = f64::from(first_usec) / 1_000_000.0;

    let stem = source
        .file_stem()
        .map_or_else(|| "midi".to_string(), |s| s.to_string_lossy().into_owned());

    let mut voices = Vec::new();
    for ((track_index, channel), mut notes) in raw_voices {
        notes.sort();
        let beat_notes = notes
            .iter()
            .map(|raw| BeatNote {
                pitch: raw.pitch,
                start_beats: tick_to_seconds(raw.on_tick, ticks_per_beat, &tempo_map)
                    / seconds_per_beat,
                end_beats: tick_to_seconds(raw.off_tick, ticks_per_beat, &tempo_map)
                    / seconds_per_beat,
            })
            .collect();
        voices.push(BeatVoice {
            label: format!("{stem}:{track_index}:{channel}"),
            notes: beat_notes,
        });
    }
    Ok(voices)
}

fn push_raw(
    raw_voices: &mut BTreeMap<(usize, u8), Vec<RawNote>>,
    track_index: usize,
    channel: u8,
    pitch: u8,
    on_tick: u64,
    off_tick: u64,
) {
    raw_voices.entry((track_index, channel)).or_default().push(RawNote {
        on_tick,
        off_tick,
        pitch,
    });
}

/// Convert an absolute SMF tick to seconds by walking the tempo map.
fn tick_to_seconds(tick: u64, ticks_per_beat: u16, tempo_map: &[TempoEvent]) -> f64 {
    let tpb = f64::from(ticks_per_beat);
    let mut seconds = 0.0;
    let mut last_tick = 0u64;
    let mut usec_per_beat = f64::from(DEFAULT_USEC_PER_BEAT);

    for te in tempo_map {
        if te.tick >= tick {
            break;
        }
        let delta_ticks = te.tick - last_tick;
        seconds += (delta_ticks as f64 / tpb) * (usec_per_beat / 1_000_000.0);
        last_tick = te.tick;
        usec_per_beat = f64::from(te.usec_per_beat);
    }

    let delta_ticks = tick - last_tick;
    seconds + (delta_ticks as f64 / tpb) * (usec_per_beat / 1_000_000.0)
}

/// Filter beat-domain voices to the pitch range, quantize onto the tick
/// grid, and compute the raster width. Voices left with no notes are
/// dropped; if nothing survives, that is a `NoVoices` error.
pub fn build_score(voices: Vec<BeatVoice>, options: &ScoreOptions) -> Result<Score, ScoreError> {
    assert!(
        options.note_unit > 0.0,
        "note_unit must be positive (beats per tick)"
    );
    let mut out = Vec::new();
    let mut max_end_beats = 0.0f64;

    for voice in voices {
        let notes: Vec<NoteEvent> = voice
            .notes
            .iter()
            .filter(|n| (options.lowest_pitch..=options.highest_pitch).contains(&n.pitch))
            .map(|n| {
                max_end_beats = max_end_beats.max(n.end_beats);
                NoteEvent::new(
                    n.pitch,
                    (n.start_beats / options.note_unit) as u32,
                    (n.end_beats / options.note_unit) as u32,
                )
            })
            .collect();
        if !notes.is_empty() {
            out.push(Voice::new(voice.label, notes));
        }
    }

    if out.is_empty() {
        return Err(ScoreError::NoVoices);
    }

    let width_ticks = ((max_end_beats / options.note_unit).ceil() as u32).max(1);
    Ok(Score {
        voices: out,
        width_ticks,
    })
}

/// Decode every file, concatenate their voices in argument order, and
/// normalize the lot into one `Score`.
pub fn load_score(paths: &[PathBuf], options: &ScoreOptions) -> Result<Score, ScoreError> {
    let mut voices = Vec::new();
    for path in paths {
        let bytes = std::fs::read(path).map_err(|source| ScoreError::Io {
            path: path.clone(),
            source,
        })?;
        voices.extend(decode_midi(&bytes, path)?);
    }
    build_score(voices, options)
}
