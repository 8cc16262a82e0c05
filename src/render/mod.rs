// src/render/mod.rs
use ratatui::{prelude::*, widgets::*};

use crate::editor::{display, EditorSession, Metrics, Position};

const TOP_BAR_HEIGHT: u16 = 1;
const SIDE_BAR_WIDTH: u16 = 20;
const SEPARATOR_WIDTH: u16 = 1;
const GUTTER_MARGIN: u16 = 1;

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    pub top_bar: Rect,
    pub side_bar: Rect,
    pub separator: Rect,
    pub gutter: Rect,
    pub text: Rect,
}

/// Splits `area` into top bar, side bar, separator, line-number gutter and
/// text pane. The gutter is as wide as the largest line number.
pub fn layout(area: Rect, line_count: usize) -> EditorLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TOP_BAR_HEIGHT), Constraint::Min(0)])
        .split(area);

    let gutter_width = line_count.to_string().len() as u16 + GUTTER_MARGIN;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDE_BAR_WIDTH),
            Constraint::Length(SEPARATOR_WIDTH),
            Constraint::Length(gutter_width),
            Constraint::Min(0),
        ])
        .split(rows[1]);

    EditorLayout {
        top_bar: rows[0],
        side_bar: columns[0],
        separator: columns[1],
        gutter: columns[2],
        text: columns[3],
    }
}

/// Paints one frame of `session`. Reads only; call `EditorSession::tick`
/// beforehand so the cursor's blink state is current.
pub fn draw(frame: &mut Frame, session: &EditorSession) {
    let regions = layout(frame.size(), session.buffer.line_count());
    let settings = &session.settings;
    let text_style = Style::default()
        .fg(settings.font_color())
        .bg(settings.editor_bg_color());
    let sidebar_style = Style::default().bg(settings.sidebar_color());

    frame.render_widget(
        Paragraph::new(status_line(session)).style(sidebar_style.add_modifier(Modifier::BOLD)),
        regions.top_bar,
    );
    frame.render_widget(
        Paragraph::new(file_label(session)).style(sidebar_style.fg(settings.font_color())),
        regions.side_bar,
    );
    frame.render_widget(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::Green)),
        regions.separator,
    );

    let first = session.scroll_offset();
    let visible = first..first + usize::from(regions.text.height);

    let numbers: Vec<Line> = visible
        .clone()
        .take_while(|&i| i < session.buffer.line_count())
        .map(|i| Line::from(format!("{}", i + 1)).alignment(Alignment::Right))
        .collect();
    let gutter = Rect {
        width: regions.gutter.width.saturating_sub(GUTTER_MARGIN),
        ..regions.gutter
    };
    frame.render_widget(Block::default().style(text_style), regions.gutter);
    frame.render_widget(
        Paragraph::new(numbers).style(text_style.fg(Color::DarkGray)),
        gutter,
    );

    let selected = text_style.add_modifier(Modifier::REVERSED);
    let lines: Vec<Line> = session
        .buffer
        .lines_in(visible)
        .iter()
        .enumerate()
        .map(|(i, l)| text_line(session, first + i, l, selected))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(text_style), regions.text);

    if session.cursor.is_visible() {
        if let Some((x, y)) = cursor_cell(session, regions.text) {
            frame.set_cursor(x, y);
        }
    }
}

/// Lays out one buffer line as terminal cells: tabs become spaces up to the
/// next stop, the first `h_scroll` cells are dropped and selected chars get
/// `selected_style`.
fn text_line<'a>(session: &EditorSession, index: usize, line: &str, selected_style: Style) -> Line<'a> {
    let tab_size = session.settings.tab_size;
    let skip = session.h_scroll();
    let selection = session.selection();

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_selected = false;
    let mut x = 0;
    for (column, ch) in line.chars().enumerate() {
        let cells = display::char_cells(ch, x, tab_size);
        let start = x;
        x += cells;
        if skip > 0 && x <= skip {
            continue;
        }

        let is_selected = selection
            .map(|(from, to)| (from..to).contains(&Position::new(index, column)))
            .unwrap_or(false);
        if is_selected != run_selected && !run.is_empty() {
            spans.push(styled_run(std::mem::take(&mut run), run_selected, selected_style));
        }
        run_selected = is_selected;

        if ch == '\t' || start < skip {
            // a wide char cut by the scroll edge shows as blanks
            run.extend(std::iter::repeat(' ').take(x - start.max(skip)));
        } else {
            run.push(ch);
        }
    }
    if !run.is_empty() {
        spans.push(styled_run(run, run_selected, selected_style));
    }
    Line::from(spans)
}

fn styled_run<'a>(text: String, selected: bool, selected_style: Style) -> Span<'a> {
    if selected {
        Span::styled(text, selected_style)
    } else {
        Span::raw(text)
    }
}

/// Terminal cell of the cursor, or `None` when it is scrolled out of
/// `text_area`.
pub fn cursor_cell(session: &EditorSession, text_area: Rect) -> Option<(u16, u16)> {
    let row = session.cursor.line.checked_sub(session.scroll_offset())?;
    let metrics = Metrics::cells(session.settings.tab_size);
    let (x, _) = metrics.cursor_point(&session.buffer, &session.cursor);
    let x = (x as usize).checked_sub(session.h_scroll())?;
    let (x, row) = (u16::try_from(x).ok()?, u16::try_from(row).ok()?);

    if x >= text_area.width || row >= text_area.height {
        return None;
    }
    Some((text_area.x + x, text_area.y + row))
}

fn status_line(session: &EditorSession) -> String {
    format!(
        " {}{}  Ln {}, Col {}",
        file_name(session),
        if session.is_modified() { " *" } else { "" },
        session.cursor.line + 1,
        session.cursor.column + 1,
    )
}

fn file_label(session: &EditorSession) -> String {
    format!(" \u{25B8} {}", file_name(session))
}

fn file_name(session: &EditorSession) -> String {
    session
        .path()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "[scratch]".to_string())
}
