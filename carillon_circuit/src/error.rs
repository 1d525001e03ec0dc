// Compiler failure modes.
//
// The compiler assumes well-formed input and performs no recovery: malformed
// timelines fail fast with a distinct error kind instead of producing wrong
// geometry. Coordinate arithmetic is checked, never wrapping.

use std::fmt;

/// Why a compile run was abandoned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileError {
    /// The voice violated the timeline contract: onsets out of order, a note
    /// ending before it starts, or a pitch outside the configured range.
    InvalidTimeline { voice: usize, detail: String },
    /// A voice with zero notes reached the compiler. Empty voices must be
    /// filtered upstream; compiling one would emit a degenerate
    /// cleanup-only segment.
    EmptyVoice { voice: usize },
    /// A coordinate overflowed during layout. Only reachable on absurdly
    /// long timelines, but reported rather than wrapped.
    CapacityExceeded,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::InvalidTimeline { voice, detail } => {
                write!(f, "voice {voice}: invalid timeline: {detail}")
            }
            CompileError::EmptyVoice { voice } => {
                write!(f, "voice {voice}: has no notes")
            }
            CompileError::CapacityExceeded => {
                write!(f, "layout exceeds the coordinate space")
            }
        }
    }
}

impl std::error::Error for CompileError {}
