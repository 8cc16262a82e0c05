// src/editor/buffer.rs
use std::ops::Range;

use super::error::{BufferError, IndexKind};

/// A (line, column) location in a buffer. Columns count `char`s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

/// Result of `TextBuffer::delete_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    /// Where the removed range started; the cursor belongs here afterwards.
    pub position: Position,
    /// The removed text, with `'\n'` for every line break consumed.
    pub removed: String,
}

/// Line-oriented text storage. Always holds at least one line and no line
/// contains `'\n'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        TextBuffer {
            lines: vec![String::new()],
        }
    }
}

impl TextBuffer {
    /// Builds a buffer by splitting `initial` on `'\n'`. Trailing empty
    /// segments are kept, so `to_text` gives back exactly `initial`.
    pub fn new(initial: &str) -> Self {
        TextBuffer {
            lines: initial.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line_at(&self, index: usize) -> Result<&str, BufferError> {
        self.line(index).ok_or(BufferError::IndexOutOfRange {
            kind: IndexKind::Line,
            index,
            bound: self.lines.len() - 1,
        })
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Length of a line in chars; 0 for a line that does not exist.
    pub fn line_len(&self, index: usize) -> usize {
        self.lines
            .get(index)
            .map(|l| l.chars().count())
            .unwrap_or(0)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Slice of lines, clamped to what exists.
    pub fn lines_in(&self, range: Range<usize>) -> &[String] {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        &self.lines[start..end]
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Inserts `text` at (`line`, `column`) and returns the position just
    /// after it. Each `'\n'` in `text` adds one line.
    pub fn insert_at(
        &mut self,
        line: usize,
        column: usize,
        text: &str,
    ) -> Result<Position, BufferError> {
        let at = self.check_position(line, column)?;

        let target = &mut self.lines[line];
        let suffix = target.split_off(at);

        let mut fragments = text.split('\n');
        // split always yields at least one fragment
        target.push_str(fragments.next().unwrap_or_default());

        let mut new_lines: Vec<String> = fragments.map(str::to_string).collect();
        let added = new_lines.len();
        let end = match new_lines.last_mut() {
            Some(last) => {
                let end = Position::new(line + added, last.chars().count());
                last.push_str(&suffix);
                end
            }
            None => {
                let end = Position::new(line, target.chars().count());
                target.push_str(&suffix);
                end
            }
        };

        self.lines.splice(line + 1..line + 1, new_lines);
        Ok(end)
    }

    /// Deletes `|length|` chars starting at (`line`, `column`), forward for a
    /// non-negative length and backward otherwise. Line breaks count as one
    /// char each. Deleting past either end of the buffer stops there.
    pub fn delete_at(
        &mut self,
        line: usize,
        column: usize,
        length: isize,
    ) -> Result<Deletion, BufferError> {
        self.check_position(line, column)?;

        let count = length.unsigned_abs();
        let at = Position::new(line, column);
        let (start, end) = if length < 0 {
            (self.walk_back(at, count), at)
        } else {
            (at, self.walk_forward(at, count))
        };
        let removed = self.remove_range(start, end);

        Ok(Deletion {
            position: start,
            removed,
        })
    }

    /// Splits a line in two at `column`; same as inserting `"\n"`.
    pub fn split_at(&mut self, line: usize, column: usize) -> Result<Position, BufferError> {
        self.insert_at(line, column, "\n")
    }

    /// Validates a position and returns the byte offset of `column` within
    /// its line.
    fn check_position(&self, line: usize, column: usize) -> Result<usize, BufferError> {
        let text = self.line_at(line)?;
        match byte_offset(text, column) {
            Some(offset) => Ok(offset),
            None => Err(BufferError::IndexOutOfRange {
                kind: IndexKind::Column,
                index: column,
                bound: text.chars().count(),
            }),
        }
    }

    fn walk_back(&self, mut pos: Position, mut remaining: usize) -> Position {
        while remaining > 0 {
            if remaining <= pos.column {
                pos.column -= remaining;
                break;
            }
            if pos.line == 0 {
                pos.column = 0;
                break;
            }
            // the chars left of the cursor plus the line break above
            remaining -= pos.column + 1;
            pos.line -= 1;
            pos.column = self.line_len(pos.line);
        }
        pos
    }

    fn walk_forward(&self, mut pos: Position, mut remaining: usize) -> Position {
        while remaining > 0 {
            let len = self.line_len(pos.line);
            let available = len - pos.column;
            if remaining <= available {
                pos.column += remaining;
                break;
            }
            if pos.line + 1 == self.lines.len() {
                pos.column = len;
                break;
            }
            remaining -= available + 1;
            pos.line += 1;
            pos.column = 0;
        }
        pos
    }

    fn remove_range(&mut self, start: Position, end: Position) -> String {
        let from = byte_offset(&self.lines[start.line], start.column).unwrap_or_default();
        let to = byte_offset(&self.lines[end.line], end.column).unwrap_or_default();

        if start.line == end.line {
            return self.lines[start.line].drain(from..to).collect();
        }

        let mut removed = self.lines[start.line].split_off(from);
        let mut joined: Vec<String> = self.lines.drain(start.line + 1..=end.line).collect();
        let tail = joined.last_mut().map(|last| last.split_off(to)).unwrap_or_default();

        for line in &joined {
            removed.push('\n');
            removed.push_str(line);
        }
        self.lines[start.line].push_str(&tail);
        removed
    }
}

/// Byte offset of the `column`-th char of `line`; `None` past the end.
/// `column == char count` is valid and maps to `line.len()`.
fn byte_offset(line: &str, column: usize) -> Option<usize> {
    line.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .nth(column)
}
