// src/editor/mod.rs
pub mod buffer;
pub mod cursor;
pub mod display;
pub mod error;
pub mod line_ending;
pub mod metrics;
pub mod session;

pub use buffer::{Deletion, Position, TextBuffer};
pub use cursor::{Cursor, BLINK_INTERVAL};
pub use error::{BufferError, EditorError, IndexKind};
pub use line_ending::LineEnding;
pub use metrics::Metrics;
pub use session::{EditorSession, Outcome};
