// Piano-roll rasterization.
//
// The image is a direct projection of the tick grid: column `t` is tick
// `t`, row `r` is pitch `highest − r`, and a note paints its row from
// `start_tick` through `end_tick − 1` inclusive. All voices share one
// canvas — overlapping notes overpaint in voice order, matching the
// circuit's voice iteration.
//
// Uses the `plotters` bitmap backend; the canvas is drawn in raw pixel
// coordinates, no chart scaffolding.

use carillon_circuit::config::CircuitConfig;
use carillon_circuit::palette::pitch_rgb;
use carillon_score::score::Score;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// Render the score as a PNG at `path`.
///
/// The canvas is `score.width_ticks` by the configured pitch range, white
/// background. Zero-length notes paint nothing but still hold their place
/// in the circuit, so the two outputs stay consistent.
pub fn render_roll(
    score: &Score,
    config: &CircuitConfig,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let width = score.width_ticks.max(1);
    let height = config.pitch_range();
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    for voice in &score.voices {
        for note in &voice.notes {
            if note.pitch < config.lowest_pitch || note.pitch > config.highest_pitch {
                continue;
            }
            let Some((first, last)) = note_span(note.start_tick, note.end_tick) else {
                continue;
            };
            let row = i32::from(config.highest_pitch) - i32::from(note.pitch);
            let (r, g, b) = pitch_rgb(note.pitch);
            root.draw(&Rectangle::new(
                [(first, row), (last, row)],
                RGBColor(r, g, b).filled(),
            ))?;
        }
    }

    root.present()?;
    Ok(())
}

/// Inclusive pixel column range for a note, or `None` when it paints
/// nothing (zero-length after quantization).
fn note_span(start_tick: u32, end_tick: u32) -> Option<(i32, i32)> {
    if end_tick <= start_tick {
        return None;
    }
    Some((start_tick as i32, end_tick as i32 - 1))
}
