// End-to-end checks of the compiled op stream against hand-verified
// reference scripts. These lock the compatibility-sensitive surface: the
// exact command text, in the exact emission order.

use carillon_circuit::compile::{compile, compile_voice};
use carillon_circuit::config::CircuitConfig;
use carillon_circuit::mcfunction::render_script;
use carillon_score::score::{NoteEvent, Voice};

#[test]
fn zero_length_note_reference_script() {
    let config = CircuitConfig::default();
    let voice = Voice::new("ref:0:0", vec![NoteEvent::new(60, 0, 0)]);
    let ops = compile_voice(&voice, 0, &config).unwrap();

    let expected = "\
setblock ~1 ~2 ~0 stone
setblock ~1 ~3 ~0 redstone_wire
setblock ~1 ~2 ~-1 stone
setblock ~1 ~3 ~-1 create:powered_latch[facing=south]
setblock ~1 ~2 ~-2 stone
setblock ~1 ~3 ~-2 create:redstone_link[facing=up]{FrequencyFirst:{id:\"minecraft:gold_block\",Count:1b},FrequencyLast:{id:\"minecraft:light_blue_wool\",Count:1b},Transmitting:1b}
setblock ~1 ~2 ~1 stone
setblock ~1 ~3 ~1 redstone_wire
setblock ~2 ~2 ~0 stone
setblock ~2 ~3 ~0 repeater[facing=west,delay=1]
setblock ~2 ~2 ~-1 stone
setblock ~2 ~3 ~-1 redstone_wire
setblock ~3 ~2 ~0 stone
setblock ~3 ~3 ~0 redstone_wire
setblock ~3 ~2 ~-1 stone
setblock ~3 ~3 ~-1 redstone_wire
setblock ~3 ~2 ~1 stone
setblock ~3 ~3 ~1 redstone_wire";

    assert_eq!(render_script(&ops), expected);
}

#[test]
fn held_note_chain_and_second_voice_offset() {
    // A 32-tick note encodes 16 delay ticks as four elements of four; the
    // second voice repeats the layout one lane height up.
    let config = CircuitConfig::default();
    let voices = vec![
        Voice::new("ref:0:0", vec![NoteEvent::new(60, 0, 32)]),
        Voice::new("ref:1:0", vec![NoteEvent::new(60, 0, 32)]),
    ];
    let ops = compile(&voices, &config).unwrap();
    let script = render_script(&ops);
    let lines: Vec<&str> = script.lines().collect();

    // Per voice: 8 shape + 4 elements * 4 ops + 6 cleanup.
    assert_eq!(lines.len(), 2 * (8 + 16 + 6));

    // The chain: four west-facing repeaters with delay 4 at x = 2..=5.
    for (i, x) in (2..=5).enumerate() {
        assert_eq!(
            lines[8 + i * 4 + 1],
            format!("setblock ~{x} ~3 ~0 repeater[facing=west,delay=4]")
        );
    }

    // The second voice is the first shifted up by voice_spacing.
    let (first, second) = ops.split_at(ops.len() / 2);
    for (a, b) in first.iter().zip(second) {
        assert_eq!(b.block, a.block);
        assert_eq!((b.pos.x, b.pos.y, b.pos.z), (a.pos.x, a.pos.y + 10, a.pos.z));
    }
}

#[test]
fn two_runs_are_byte_identical() {
    let config = CircuitConfig::default();
    let voices: Vec<Voice> = (0..4)
        .map(|v| {
            Voice::new(
                format!("ref:{v}:0"),
                (0..60u32)
                    .map(|i| NoteEvent::new(42 + ((i + v) % 37) as u8, i * 6, i * 6 + 4))
                    .collect(),
            )
        })
        .collect();
    let first = render_script(&compile(&voices, &config).unwrap());
    let second = render_script(&compile(&voices, &config).unwrap());
    assert_eq!(first, second);
}
