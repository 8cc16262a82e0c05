// src/editor/cursor.rs
use std::time::{Duration, Instant};

use super::buffer::{Position, TextBuffer};
use super::error::BufferError;

/// How long the cursor stays in one blink state.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Insertion point plus blink state. The cursor does not hold the buffer;
/// every operation borrows it and keeps `line < line_count()` and
/// `column <= line_len(line)`.
#[derive(Debug, Clone)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
    visible: bool,
    last_blink: Instant,
    blinking: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::new(0, 0)
    }
}

impl Cursor {
    pub fn new(line: usize, column: usize) -> Self {
        Cursor {
            line,
            column,
            visible: true,
            last_blink: Instant::now(),
            blinking: true,
        }
    }

    /// Creates a cursor clamped into `buffer`.
    pub fn at(buffer: &TextBuffer, line: usize, column: usize) -> Self {
        let mut cursor = Cursor::new(line, column);
        cursor.clamp(buffer);
        cursor
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking
    }

    pub fn move_to(&mut self, buffer: &TextBuffer, line: usize, column: usize) {
        self.line = line;
        self.column = column;
        self.clamp(buffer);
    }

    /// Pulls the cursor back inside `buffer`, e.g. after lines were removed
    /// beneath it.
    pub fn clamp(&mut self, buffer: &TextBuffer) {
        self.line = self.line.min(buffer.line_count() - 1);
        self.column = self.column.min(buffer.line_len(self.line));
    }

    pub fn move_left(&mut self, buffer: &TextBuffer) {
        self.clamp(buffer);
        if self.column > 0 {
            self.column -= 1;
        } else if self.line > 0 {
            self.line -= 1;
            self.column = buffer.line_len(self.line);
        }
    }

    pub fn move_right(&mut self, buffer: &TextBuffer) {
        self.clamp(buffer);
        if self.column < buffer.line_len(self.line) {
            self.column += 1;
        } else if self.line + 1 < buffer.line_count() {
            self.line += 1;
            self.column = 0;
        }
    }

    pub fn move_up(&mut self, buffer: &TextBuffer) {
        self.clamp(buffer);
        if self.line > 0 {
            self.line -= 1;
            self.column = self.column.min(buffer.line_len(self.line));
        } else {
            self.column = 0;
        }
    }

    pub fn move_down(&mut self, buffer: &TextBuffer) {
        self.clamp(buffer);
        if self.line + 1 < buffer.line_count() {
            self.line += 1;
            self.column = self.column.min(buffer.line_len(self.line));
        } else {
            self.column = buffer.line_len(self.line);
        }
    }

    pub fn move_line_start(&mut self, buffer: &TextBuffer) {
        self.clamp(buffer);
        self.column = 0;
    }

    pub fn move_line_end(&mut self, buffer: &TextBuffer) {
        self.clamp(buffer);
        self.column = buffer.line_len(self.line);
    }

    /// Inserts `text` at the cursor and leaves the cursor right after it.
    pub fn insert_text(&mut self, buffer: &mut TextBuffer, text: &str) -> Result<(), BufferError> {
        self.clamp(buffer);
        let end = buffer.insert_at(self.line, self.column, text)?;
        self.line = end.line;
        self.column = end.column;
        Ok(())
    }

    /// Deletes `|length|` chars (backward when negative) and moves to where
    /// the removed range began. Returns the removed text.
    pub fn delete_text(
        &mut self,
        buffer: &mut TextBuffer,
        length: isize,
    ) -> Result<String, BufferError> {
        self.clamp(buffer);
        let deletion = buffer.delete_at(self.line, self.column, length)?;
        self.line = deletion.position.line;
        self.column = deletion.position.column;
        Ok(deletion.removed)
    }

    pub fn split_line(&mut self, buffer: &mut TextBuffer) -> Result<(), BufferError> {
        self.clamp(buffer);
        buffer.split_at(self.line, self.column)?;
        self.line += 1;
        self.column = 0;
        Ok(())
    }

    /// Called once per frame. Toggles visibility once more than
    /// `BLINK_INTERVAL` has passed since the last toggle.
    pub fn tick_blink(&mut self, now: Instant) {
        if !self.blinking {
            return;
        }
        if now.saturating_duration_since(self.last_blink) > BLINK_INTERVAL {
            self.visible = !self.visible;
            self.last_blink = now;
        }
    }

    /// Shows the cursor immediately and restarts the blink timer.
    pub fn reset_blink(&mut self, now: Instant) {
        self.visible = true;
        self.last_blink = now;
    }

    pub fn set_blinking(&mut self, active: bool) {
        self.blinking = active;
    }
}
