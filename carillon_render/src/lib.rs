// Carillon piano-roll rendering.
//
// Turns a normalized score into a raster overview image: one pixel column
// per tick, one pixel row per pitch, hues from the same tone table the
// circuit compiler transmits on. The image and the circuit are two views of
// the same data and must never disagree about a note's color class.

pub mod roll;
