// src/editor/error.rs
use std::fmt;

use thiserror::Error;

/// Which coordinate of a position was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Line,
    Column,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Line => f.write_str("line"),
            IndexKind::Column => f.write_str("column"),
        }
    }
}

/// Raised by `TextBuffer` when a caller passes coordinates outside the
/// current document. Cursor operations clamp first, so seeing this means the
/// caller bypassed the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("{kind} index out of range: received {index}, valid up to {bound}")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        bound: usize,
    },
}

/// Errors surfaced by an editing session.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No location to save to")]
    NoSaveLocation,
}
