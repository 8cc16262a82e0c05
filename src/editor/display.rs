// src/editor/display.rs
//! Column <-> screen cell conversion. Tabs advance to the next multiple of
//! the tab size and wide characters take two cells.

use unicode_width::UnicodeWidthChar;

/// Cells taken by `ch` when it starts at cell `x`.
pub fn char_cells(ch: char, x: usize, tab_size: usize) -> usize {
    if ch == '\t' {
        let tab = tab_size.max(1);
        tab - x % tab
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(1)
    }
}

/// Cell offset at which `column` starts in `line`.
pub fn width_to_column(line: &str, column: usize, tab_size: usize) -> usize {
    line.chars()
        .take(column)
        .fold(0, |x, ch| x + char_cells(ch, x, tab_size))
}

/// Column whose boundary is closest to cell offset `x`. Past the end of the
/// line this is the line length.
pub fn column_at_width(line: &str, x: usize, tab_size: usize) -> usize {
    let mut start = 0;
    for (column, ch) in line.chars().enumerate() {
        let cells = char_cells(ch, start, tab_size);
        if x < start + cells {
            // left half of the char puts the cursor before it
            return if (x - start) * 2 < cells { column } else { column + 1 };
        }
        start += cells;
    }
    line.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_snap_to_stops() {
        assert_eq!(width_to_column("\tx", 1, 4), 4);
        assert_eq!(width_to_column("ab\tx", 3, 4), 4);
        assert_eq!(width_to_column("abcd\tx", 5, 4), 8);
    }

    #[test]
    fn test_wide_chars_take_two_cells() {
        assert_eq!(width_to_column("日本語", 3, 4), 6);
        assert_eq!(width_to_column("a日b", 2, 4), 3);
    }

    #[test]
    fn test_column_at_width() {
        assert_eq!(column_at_width("日本語", 0, 4), 0);
        assert_eq!(column_at_width("日本語", 2, 4), 1);
        assert_eq!(column_at_width("日本語", 3, 4), 2);
        assert_eq!(column_at_width("日本語", 40, 4), 3);
        assert_eq!(column_at_width("\tx", 1, 4), 0);
        assert_eq!(column_at_width("\tx", 3, 4), 1);
        assert_eq!(column_at_width("\tx", 4, 4), 1);
    }
}
