// src/editor/metrics.rs
use super::buffer::{Position, TextBuffer};
use super::cursor::Cursor;
use super::display;

/// Size of one character cell, in whatever unit the renderer draws in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub char_width: f32,
    pub line_height: f32,
    pub tab_size: usize,
}

impl Metrics {
    /// One terminal cell per narrow character.
    pub const fn cells(tab_size: usize) -> Self {
        Metrics {
            char_width: 1.0,
            line_height: 1.0,
            tab_size,
        }
    }

    pub fn new(char_width: f32, line_height: f32, tab_size: usize) -> Self {
        Metrics {
            char_width,
            line_height,
            tab_size,
        }
    }

    /// Top-left corner of the cursor relative to the text origin.
    pub fn cursor_point(&self, buffer: &TextBuffer, cursor: &Cursor) -> (f32, f32) {
        let line = buffer.line(cursor.line).unwrap_or_default();
        let cells = display::width_to_column(line, cursor.column, self.tab_size);
        (
            cells as f32 * self.char_width,
            cursor.line as f32 * self.line_height,
        )
    }

    /// Maps a point relative to the text origin to the nearest valid
    /// position. Points above or left of the text land on row/column 0,
    /// points past the text land on the last line or end of line.
    pub fn position_at(&self, buffer: &TextBuffer, x: f32, y: f32) -> Position {
        let row = (y / self.line_height).floor().max(0.0) as usize;
        let line = row.min(buffer.line_count() - 1);

        let cell = (x / self.char_width).floor().max(0.0) as usize;
        let text = buffer.line(line).unwrap_or_default();
        Position::new(line, display::column_at_width(text, cell, self.tab_size))
    }
}
