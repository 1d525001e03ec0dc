// Serialization of placement ops into a `.mcfunction` script.
//
// Each op becomes one self-contained `setblock` command with coordinates
// relative to the execution origin. The script is the emission order,
// newline-joined, with no trailing newline — consumers replay it verbatim,
// so this module must never reorder, merge, or reformat ops.
//
// This is the only place block ids and attribute syntax exist; the compiler
// itself deals purely in `PlacementOp` values.

use crate::op::{Block, PlacementOp};

/// Render one placement op as a `setblock` command.
pub fn render_command(op: &PlacementOp) -> String {
    format!(
        "setblock ~{} ~{} ~{} {}",
        op.pos.x,
        op.pos.y,
        op.pos.z,
        block_id(&op.block)
    )
}

/// Render the whole op sequence, one command per line, in emission order.
pub fn render_script(ops: &[PlacementOp]) -> String {
    ops.iter()
        .map(render_command)
        .collect::<Vec<_>>()
        .join("\n")
}

fn block_id(block: &Block) -> String {
    match block {
        Block::Support => "stone".to_string(),
        Block::Wire => "redstone_wire".to_string(),
        Block::DelayElement { facing, delay } => {
            format!("repeater[facing={},delay={delay}]", facing.id())
        }
        Block::Latch { facing } => {
            format!("create:powered_latch[facing={}]", facing.id())
        }
        Block::Instruction { octave, tone } => format!(
            "create:redstone_link[facing=up]{{FrequencyFirst:{{id:\"minecraft:{}\",Count:1b}},FrequencyLast:{{id:\"minecraft:{}\",Count:1b}},Transmitting:1b}}",
            octave.block_id(),
            tone.block_id()
        ),
    }
}
