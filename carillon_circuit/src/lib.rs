// Carillon circuit compiler.
//
// Walks each voice's note sequence and emits an ordered list of 3D placement
// operations that lay the timeline out as a redstone pulse circuit: a lane of
// chained delay elements per voice, one fixed latch/transmitter micro-layout
// per note, and a lateral fold ("snake") whenever the lane's bounded span
// would be exceeded. The op sequence is the product — its order is
// load-bearing and is preserved verbatim through serialization.
//
// Architecture:
// - config.rs: `CircuitConfig`, every tunable layout parameter in one struct
// - op.rs: `Coord` / `Block` / `PlacementOp`, the structured output model
// - palette.rs: the shared 12-entry tone table (instruction block + raster
//   hue derive from the same entries)
// - cursor.rs: `CursorState`, the per-voice position/direction/fold state
// - delay.rs: greedy duration encoding into bounded delay elements
// - fold.rs: the lateral bridge that folds a lane back on itself
// - emit.rs: the fixed 8-op per-note micro-layout
// - compile.rs: the per-voice driver and the multi-voice entry point
// - mcfunction.rs: boundary serialization of ops into `setblock` commands
//
// The compiler is a deterministic batch transform: no clocks, no randomness,
// no iteration over unordered containers. Two runs over the same input and
// config produce byte-identical output.

pub mod compile;
pub mod config;
pub mod cursor;
pub mod delay;
pub mod emit;
pub mod error;
pub mod fold;
pub mod mcfunction;
pub mod op;
pub mod palette;
