// src/input/mod.rs
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Everything a terminal event can ask the editor to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Insert(String),
    Tab,
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Save,
    Quit,
    /// Left button pressed at an absolute terminal cell.
    Click { column: u16, row: u16 },
    /// Left button moved while held; extends the selection.
    Drag { column: u16, row: u16 },
}

impl EditAction {
    /// Whether the action changes the buffer contents.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            EditAction::Insert(_)
                | EditAction::Tab
                | EditAction::Newline
                | EditAction::Backspace
                | EditAction::Delete
        )
    }
}

pub fn translate(event: &Event) -> Option<EditAction> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Paste(text) => Some(EditAction::Insert(text.replace("\r\n", "\n").replace('\r', "\n"))),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<EditAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => Some(EditAction::Save),
            KeyCode::Char('q') => Some(EditAction::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char(ch) => EditAction::Insert(ch.to_string()),
        KeyCode::Tab => EditAction::Tab,
        KeyCode::Enter => EditAction::Newline,
        KeyCode::Backspace => EditAction::Backspace,
        KeyCode::Delete => EditAction::Delete,
        KeyCode::Left => EditAction::Left,
        KeyCode::Right => EditAction::Right,
        KeyCode::Up => EditAction::Up,
        KeyCode::Down => EditAction::Down,
        KeyCode::Home => EditAction::Home,
        KeyCode::End => EditAction::End,
        _ => return None,
    };
    Some(action)
}

fn translate_mouse(mouse: &MouseEvent) -> Option<EditAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(EditAction::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        MouseEventKind::Drag(MouseButton::Left) => Some(EditAction::Drag {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}
