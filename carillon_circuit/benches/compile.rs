//! Compiler throughput benchmarks.
//!
//! Run with `cargo bench -p carillon_circuit`.

use carillon_circuit::compile::compile;
use carillon_circuit::config::CircuitConfig;
use carillon_score::score::{NoteEvent, Voice};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const NOTE_COUNTS: [u32; 3] = [100, 1_000, 10_000];

/// A dense synthetic voice: chromatic walk, short notes, small gaps, enough
/// travel to fold the lane many times.
fn build_voice(index: u32, notes: u32) -> Voice {
    let events = (0..notes)
        .map(|i| {
            let pitch = 42 + ((i * 7 + index) % 37) as u8;
            NoteEvent::new(pitch, i * 6, i * 6 + 4)
        })
        .collect();
    Voice::new(format!("bench:{index}:0"), events)
}

fn bench_compile(c: &mut Criterion) {
    let config = CircuitConfig::default();
    let mut group = c.benchmark_group("compile");

    for &notes in &NOTE_COUNTS {
        let voices: Vec<Voice> = (0..4).map(|v| build_voice(v, notes)).collect();
        group.bench_function(format!("4_voices_{notes}_notes"), |b| {
            b.iter(|| compile(black_box(&voices), black_box(&config)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);
