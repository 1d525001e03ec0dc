// Carillon — CLI entry point.
//
// Decodes one or more MIDI files into a normalized score, renders a
// piano-roll overview, and compiles the score into a redstone circuit
// script. The pipeline: decode → render → compile → write.
//
// Usage:
//   carillon <midi files>... [--out STEM] [--note-unit N] [--voice-height N]
//     [--span N]
//
// `--note-unit N` sets the quantization grid to N/16 of a beat (default 4,
// a sixteenth note). Outputs land in STEM.png and STEM.mcfunction.

use carillon_circuit::compile::compile;
use carillon_circuit::config::CircuitConfig;
use carillon_circuit::mcfunction::render_script;
use carillon_render::roll::render_roll;
use carillon_score::midi::{ScoreOptions, load_score};
use std::path::{Path, PathBuf};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Positional arguments are MIDI paths; every flag consumes one value.
    let mut midi_paths: Vec<PathBuf> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if args[i].starts_with("--") {
            i += 2;
        } else {
            midi_paths.push(PathBuf::from(&args[i]));
            i += 1;
        }
    }
    if midi_paths.is_empty() {
        eprintln!(
            "Usage: carillon <midi files>... [--out STEM] [--note-unit N] \
             [--voice-height N] [--span N]"
        );
        std::process::exit(1);
    }

    let out_stem: String = parse_flag(&args, "--out").unwrap_or_else(|| "song".to_string());
    let note_unit_arg: f64 = parse_flag(&args, "--note-unit").unwrap_or(4.0);
    let voice_height: i32 = parse_flag(&args, "--voice-height").unwrap_or(10);
    let span: i32 = parse_flag(&args, "--span").unwrap_or(64);

    if note_unit_arg <= 0.0 {
        eprintln!("--note-unit must be positive, got {note_unit_arg}");
        std::process::exit(1);
    }

    let config = CircuitConfig {
        span,
        voice_spacing: voice_height,
        ..CircuitConfig::default()
    };
    let options = ScoreOptions {
        lowest_pitch: config.lowest_pitch,
        highest_pitch: config.highest_pitch,
        note_unit: note_unit_arg / 16.0,
    };

    let image_path = format!("{out_stem}.png");
    let script_path = format!("{out_stem}.mcfunction");

    println!("=== Carillon ===");
    println!("Inputs: {} MIDI file(s)", midi_paths.len());
    println!("Note unit: {note_unit_arg}/16 beat");
    println!("Voice spacing: {voice_height}");
    println!("Lane span: {span}");
    println!();

    println!("[1/3] Decoding MIDI...");
    let score = match load_score(&midi_paths, &options) {
        Ok(score) => score,
        Err(e) => {
            eprintln!("  Error: {e}");
            std::process::exit(1);
        }
    };
    println!(
        "  {} voice(s), {} note(s), {} tick(s) wide.",
        score.voices.len(),
        score.note_count(),
        score.width_ticks
    );
    for (index, voice) in score.voices.iter().enumerate() {
        println!(
            "  Voice {index}: {} ({} notes)",
            voice.label,
            voice.notes.len()
        );
    }

    println!("[2/3] Rendering piano roll to {image_path}...");
    if let Err(e) = render_roll(&score, &config, Path::new(&image_path)) {
        eprintln!("  Error: {e}");
        std::process::exit(1);
    }

    println!("[3/3] Compiling circuit to {script_path}...");
    let ops = match compile(&score.voices, &config) {
        Ok(ops) => ops,
        Err(e) => {
            eprintln!("  Error: {e}");
            std::process::exit(1);
        }
    };
    println!("  {} placement operation(s).", ops.len());
    if let Err(e) = std::fs::write(&script_path, render_script(&ops)) {
        eprintln!("  Error writing {script_path}: {e}");
        std::process::exit(1);
    }

    println!();
    println!("Done. Run {script_path} as a datapack function at the build origin.");
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
