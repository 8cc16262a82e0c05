// src/editor/session.rs
use std::path::{Path, PathBuf};
use std::time::Instant;

use ratatui::layout::Rect;

use super::buffer::{Position, TextBuffer};
use super::cursor::{Cursor, BLINK_INTERVAL};
use super::display;
use super::error::EditorError;
use super::line_ending::LineEnding;
use super::metrics::Metrics;
use crate::config::{EditorSettings, APP_DIR};
use crate::input::EditAction;

/// What the caller should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Saved(PathBuf),
    Quit,
}

/// One open document: the buffer, its cursor and everything the input and
/// render sides share about it.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub buffer: TextBuffer,
    pub cursor: Cursor,
    pub settings: EditorSettings,
    path: Option<PathBuf>,
    line_ending: LineEnding,
    is_modified: bool,
    scroll_offset: usize,
    /// First visible cell of every line.
    h_scroll: usize,
    /// Where the current mouse selection started.
    selection_anchor: Option<Position>,
    text_area: Rect,
    last_input: Option<Instant>,
}

impl EditorSession {
    pub fn new(text: &str, settings: EditorSettings) -> Self {
        EditorSession {
            buffer: TextBuffer::new(text),
            cursor: Cursor::default(),
            settings,
            path: None,
            line_ending: LineEnding::default(),
            is_modified: false,
            scroll_offset: 0,
            h_scroll: 0,
            selection_anchor: None,
            text_area: Rect::default(),
            last_input: None,
        }
    }

    /// Opens `path`, or starts an empty document bound to it when the file
    /// does not exist yet.
    pub fn open(path: &Path, settings: EditorSettings) -> Result<Self, EditorError> {
        let text = if path.exists() {
            std::fs::read_to_string(path)?
        } else {
            String::new()
        };
        let line_ending = LineEnding::detect(&text);

        let mut session = EditorSession::new(&LineEnding::normalize(&text), settings);
        session.path = Some(path.to_path_buf());
        session.line_ending = line_ending;
        tracing::info!(
            "Opened {} ({} lines, {:?})",
            path.display(),
            session.buffer.line_count(),
            line_ending
        );
        Ok(session)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn h_scroll(&self) -> usize {
        self.h_scroll
    }

    /// Ordered `(start, end)` of the highlighted range, if the mouse has
    /// dragged away from where it was pressed.
    pub fn selection(&self) -> Option<(Position, Position)> {
        let anchor = self.selection_anchor?;
        let head = self.cursor.position();
        match anchor.cmp(&head) {
            std::cmp::Ordering::Less => Some((anchor, head)),
            std::cmp::Ordering::Greater => Some((head, anchor)),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Tells the session where the text is drawn, so clicks and scrolling
    /// line up with the screen.
    pub fn set_text_area(&mut self, area: Rect) {
        self.text_area = area;
        self.scroll_into_view();
    }

    pub fn apply(&mut self, action: EditAction, now: Instant) -> Result<Outcome, EditorError> {
        self.note_input(now);
        tracing::debug!(?action, line = self.cursor.line, column = self.cursor.column, "apply");

        let metrics = Metrics::cells(self.settings.tab_size);
        let mut outcome = Outcome::Continue;
        match &action {
            EditAction::Insert(text) => self.cursor.insert_text(&mut self.buffer, text)?,
            EditAction::Tab => {
                let indent = self.settings.indent_unit();
                self.cursor.insert_text(&mut self.buffer, &indent)?;
            }
            EditAction::Newline => self.cursor.split_line(&mut self.buffer)?,
            EditAction::Backspace => {
                self.cursor.delete_text(&mut self.buffer, -1)?;
            }
            EditAction::Delete => {
                self.cursor.delete_text(&mut self.buffer, 1)?;
            }
            EditAction::Left => self.cursor.move_left(&self.buffer),
            EditAction::Right => self.cursor.move_right(&self.buffer),
            EditAction::Up => self.cursor.move_up(&self.buffer),
            EditAction::Down => self.cursor.move_down(&self.buffer),
            EditAction::Home => self.cursor.move_line_start(&self.buffer),
            EditAction::End => self.cursor.move_line_end(&self.buffer),
            EditAction::Save => outcome = Outcome::Saved(self.save()?),
            EditAction::Quit => outcome = Outcome::Quit,
            EditAction::Click { column, row } => {
                self.place_cursor(*column, *row, metrics);
                self.selection_anchor = Some(self.cursor.position());
            }
            EditAction::Drag { column, row } => {
                if self.selection_anchor.is_none() {
                    self.selection_anchor = Some(self.cursor.position());
                }
                self.place_cursor(*column, *row, metrics);
            }
        }

        match &action {
            EditAction::Click { .. } | EditAction::Drag { .. } | EditAction::Save | EditAction::Quit => {}
            _ => self.selection_anchor = None,
        }
        if action.is_edit() {
            self.is_modified = true;
        }
        self.scroll_into_view();
        Ok(outcome)
    }

    /// Moves the cursor to the text position under an absolute screen point.
    pub fn place_cursor(&mut self, x: u16, y: u16, metrics: Metrics) {
        let rel_x = f32::from(x) - f32::from(self.text_area.x)
            + self.h_scroll as f32 * metrics.char_width;
        let rel_y = f32::from(y) - f32::from(self.text_area.y)
            + self.scroll_offset as f32 * metrics.line_height;
        let pos = metrics.position_at(&self.buffer, rel_x, rel_y);
        self.cursor.move_to(&self.buffer, pos.line, pos.column);
    }

    /// Per-frame update. Blinking resumes once the user has been idle for a
    /// full blink interval.
    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last_input {
            if !self.cursor.is_blinking()
                && now.saturating_duration_since(last) >= BLINK_INTERVAL
            {
                self.cursor.set_blinking(true);
                self.cursor.reset_blink(now);
            }
        }
        self.cursor.tick_blink(now);
    }

    /// Writes the document to its path, or to a new scratch file when it has
    /// none. Returns where it was written.
    pub fn save(&mut self) -> Result<PathBuf, EditorError> {
        let target = match &self.path {
            Some(path) => path.clone(),
            None => scratch_path().ok_or(EditorError::NoSaveLocation)?,
        };

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, self.line_ending.apply(&self.buffer.to_text()))?;
        tracing::info!("Saved {} lines to {}", self.buffer.line_count(), target.display());

        self.path = Some(target.clone());
        self.is_modified = false;
        Ok(target)
    }

    fn note_input(&mut self, now: Instant) {
        self.last_input = Some(now);
        self.cursor.reset_blink(now);
        self.cursor.set_blinking(false);
    }

    fn scroll_into_view(&mut self) {
        let height = usize::from(self.text_area.height);
        if height > 0 {
            if self.cursor.line < self.scroll_offset {
                self.scroll_offset = self.cursor.line;
            } else if self.cursor.line >= self.scroll_offset + height {
                self.scroll_offset = self.cursor.line + 1 - height;
            }
        }

        let width = usize::from(self.text_area.width);
        if width > 0 {
            let line = self.buffer.line(self.cursor.line).unwrap_or_default();
            let x = display::width_to_column(line, self.cursor.column, self.settings.tab_size);
            if x < self.h_scroll {
                self.h_scroll = x;
            } else if x >= self.h_scroll + width {
                self.h_scroll = x + 1 - width;
            }
        }
    }
}

fn scratch_path() -> Option<PathBuf> {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(format!("scratch-{}.txt", timestamp)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Position;
    use std::time::Duration;

    fn session(text: &str) -> EditorSession {
        EditorSession::new(text, EditorSettings::default())
    }

    fn type_str(session: &mut EditorSession, text: &str, now: Instant) {
        for ch in text.chars() {
            session.apply(EditAction::Insert(ch.to_string()), now).unwrap();
        }
    }

    #[test]
    fn test_typing_marks_modified() {
        let mut s = session("");
        assert!(!s.is_modified());
        type_str(&mut s, "hey", Instant::now());
        assert_eq!(s.buffer.to_text(), "hey");
        assert_eq!(s.cursor.position(), Position::new(0, 3));
        assert!(s.is_modified());
    }

    #[test]
    fn test_navigation_does_not_modify() {
        let mut s = session("ab\ncd");
        s.apply(EditAction::Down, Instant::now()).unwrap();
        s.apply(EditAction::End, Instant::now()).unwrap();
        assert_eq!(s.cursor.position(), Position::new(1, 2));
        assert!(!s.is_modified());
    }

    #[test]
    fn test_tab_uses_settings() {
        let mut settings = EditorSettings::default();
        settings.tab_size = 2;
        let mut s = EditorSession::new("x", settings);
        s.apply(EditAction::Tab, Instant::now()).unwrap();
        assert_eq!(s.buffer.to_text(), "  x");
        assert_eq!(s.cursor.column, 2);
    }

    #[test]
    fn test_backspace_at_origin_is_harmless() {
        let mut s = session("abc");
        s.apply(EditAction::Backspace, Instant::now()).unwrap();
        assert_eq!(s.buffer.to_text(), "abc");
        assert_eq!(s.cursor.position(), Position::new(0, 0));
    }

    #[test]
    fn test_enter_then_backspace_restores() {
        let mut s = session("hello");
        s.cursor.move_to(&s.buffer, 0, 2);
        s.apply(EditAction::Newline, Instant::now()).unwrap();
        assert_eq!(s.buffer.line_count(), 2);
        s.apply(EditAction::Backspace, Instant::now()).unwrap();
        assert_eq!(s.buffer.to_text(), "hello");
        assert_eq!(s.cursor.position(), Position::new(0, 2));
    }

    #[test]
    fn test_delete_key_joins_lines() {
        let mut s = session("ab\ncd");
        s.apply(EditAction::End, Instant::now()).unwrap();
        s.apply(EditAction::Delete, Instant::now()).unwrap();
        assert_eq!(s.buffer.to_text(), "abcd");
    }

    #[test]
    fn test_blink_pauses_while_typing() {
        let start = Instant::now();
        let mut s = session("");
        s.apply(EditAction::Insert("a".to_string()), start).unwrap();

        s.tick(start + Duration::from_millis(300));
        assert!(!s.cursor.is_blinking());
        assert!(s.cursor.is_visible());

        s.tick(start + Duration::from_millis(500));
        assert!(s.cursor.is_blinking());
        assert!(s.cursor.is_visible());

        s.tick(start + Duration::from_millis(1001));
        assert!(!s.cursor.is_visible());
    }

    #[test]
    fn test_click_places_cursor_relative_to_text_area() {
        let mut s = session("first\nsecond\nthird");
        s.set_text_area(Rect::new(10, 2, 40, 10));
        s.apply(EditAction::Click { column: 13, row: 3 }, Instant::now()).unwrap();
        assert_eq!(s.cursor.position(), Position::new(1, 3));

        s.apply(EditAction::Click { column: 0, row: 50 }, Instant::now()).unwrap();
        assert_eq!(s.cursor.position(), Position::new(2, 0));
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let text = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut s = session(&text);
        s.set_text_area(Rect::new(0, 0, 20, 5));
        for _ in 0..7 {
            s.apply(EditAction::Down, Instant::now()).unwrap();
        }
        assert_eq!(s.scroll_offset(), 3);
        for _ in 0..7 {
            s.apply(EditAction::Up, Instant::now()).unwrap();
        }
        assert_eq!(s.scroll_offset(), 0);
    }

    #[test]
    fn test_horizontal_scroll_follows_cursor() {
        let mut s = session(&"x".repeat(30));
        s.set_text_area(Rect::new(0, 0, 10, 3));
        s.apply(EditAction::End, Instant::now()).unwrap();
        assert_eq!(s.h_scroll(), 21);

        // clicks land on the scrolled text
        s.apply(EditAction::Click { column: 0, row: 0 }, Instant::now()).unwrap();
        assert_eq!(s.cursor.position(), Position::new(0, 21));

        s.apply(EditAction::Home, Instant::now()).unwrap();
        assert_eq!(s.h_scroll(), 0);
    }

    #[test]
    fn test_drag_selects_until_next_click() {
        let mut s = session("first\nsecond\nthird");
        s.set_text_area(Rect::new(0, 0, 40, 10));
        s.apply(EditAction::Click { column: 1, row: 0 }, Instant::now()).unwrap();
        assert_eq!(s.selection(), None);

        s.apply(EditAction::Drag { column: 3, row: 1 }, Instant::now()).unwrap();
        assert_eq!(s.selection(), Some((Position::new(0, 1), Position::new(1, 3))));
        assert_eq!(s.cursor.position(), Position::new(1, 3));

        // dragging back above the anchor flips the range
        s.apply(EditAction::Drag { column: 0, row: 0 }, Instant::now()).unwrap();
        assert_eq!(s.selection(), Some((Position::new(0, 0), Position::new(0, 1))));

        s.apply(EditAction::Click { column: 2, row: 2 }, Instant::now()).unwrap();
        assert_eq!(s.selection(), None);
    }

    #[test]
    fn test_edit_clears_selection() {
        let mut s = session("abc");
        s.set_text_area(Rect::new(0, 0, 40, 10));
        s.apply(EditAction::Click { column: 0, row: 0 }, Instant::now()).unwrap();
        s.apply(EditAction::Drag { column: 2, row: 0 }, Instant::now()).unwrap();
        assert!(s.selection().is_some());

        s.apply(EditAction::Insert("x".to_string()), Instant::now()).unwrap();
        assert_eq!(s.selection(), None);
        assert_eq!(s.buffer.to_text(), "abxc");
    }

    #[test]
    fn test_crlf_survives_open_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dos.txt");
        std::fs::write(&path, "one\r\ntwo\r\n").unwrap();

        let mut s = EditorSession::open(&path, EditorSettings::default()).unwrap();
        assert_eq!(s.line_ending(), LineEnding::Crlf);
        assert_eq!(s.buffer.line(0), Some("one"));
        s.apply(EditAction::End, Instant::now()).unwrap();
        type_str(&mut s, "!", Instant::now());
        s.save().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one!\r\ntwo\r\n");
    }

    #[test]
    fn test_save_writes_and_clears_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut s = EditorSession::open(&path, EditorSettings::default()).unwrap();
        type_str(&mut s, "saved", Instant::now());

        let outcome = s.apply(EditAction::Save, Instant::now()).unwrap();
        assert_eq!(outcome, Outcome::Saved(path.clone()));
        assert!(!s.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "saved");

        let reopened = EditorSession::open(&path, EditorSettings::default()).unwrap();
        assert_eq!(reopened.buffer.to_text(), "saved");
    }

    #[test]
    fn test_quit_outcome() {
        let mut s = session("");
        assert_eq!(s.apply(EditAction::Quit, Instant::now()).unwrap(), Outcome::Quit);
    }
}
