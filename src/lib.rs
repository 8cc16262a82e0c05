//! A small terminal text editor built on a line/column text buffer and a
//! blinking cursor.
//!
//! The [`editor`] module is the engine and knows nothing about terminals
//! beyond the rectangle it is drawn into. [`input`] turns terminal events
//! into [`input::EditAction`]s and [`render`] paints an
//! [`editor::EditorSession`] with ratatui.

pub mod app;
pub mod config;
pub mod editor;
pub mod input;
pub mod logging;
pub mod render;

pub use config::EditorSettings;
pub use editor::{Cursor, EditorSession, Position, TextBuffer};
