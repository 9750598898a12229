//! Plain-text rendering of a table.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::{Alignment, Column};
use crate::row::TableRow;
use crate::sort::SortSpec;
use crate::state::Table;

const EMPTY_MESSAGE: &str = "No results.";
const SEPARATOR: &str = "  ";

/// Truncate a string to a display width, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

/// Fit text into exactly `width` display columns.
pub fn align_to_width(s: &str, width: usize, align: Alignment) -> String {
    let text = truncate_to_width(s, width);
    let padding = width.saturating_sub(text.width());
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(padding)),
        Alignment::Right => format!("{}{}", " ".repeat(padding), text),
        Alignment::Center => {
            let left = padding / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(padding - left))
        }
    }
}

/// Header text with the sort indicator on the side that keeps the label
/// aligned. Multi-key sorts also show the key's priority.
fn header_text<R>(column: &Column<R>, sort: &[SortSpec]) -> String {
    let Some(priority) = sort.iter().position(|spec| spec.column == column.id) else {
        return column.header.clone();
    };
    let mut indicator = sort[priority].direction.indicator().to_string();
    if sort.len() > 1 {
        indicator.push_str(&(priority + 1).to_string());
    }
    match column.align {
        Alignment::Right => format!("{} {}", indicator, column.header),
        Alignment::Left | Alignment::Center => format!("{} {}", column.header, indicator),
    }
}

fn join_line(cells: Vec<String>) -> String {
    cells.join(SEPARATOR).trim_end().to_string()
}

/// Render the visible rows of a table as text lines.
///
/// The first column is the selection checkbox; the last line is the
/// selection summary. An empty view renders "No results." in place of rows.
pub fn render_lines<R: TableRow>(table: &Table<R>) -> Vec<String> {
    let columns = table.columns();
    let sort = table.sort();
    let indicator_width = R::selection_indicator(false).width();

    let mut lines = Vec::new();

    let mut header = vec![" ".repeat(indicator_width)];
    header.extend(columns.iter().map(|column| {
        align_to_width(&header_text(column, &sort), column.width as usize, column.align)
    }));
    lines.push(join_line(header));

    let rows = table.visible_rows();
    if rows.is_empty() {
        lines.push(EMPTY_MESSAGE.to_string());
    }
    for row in &rows {
        let selected = table.is_selected(&row.id());
        let mut cells = vec![R::selection_indicator(selected).to_string()];
        cells.extend(columns.iter().map(|column| {
            align_to_width(&column.display(row), column.width as usize, column.align)
        }));
        lines.push(join_line(cells));
    }

    lines.push(table.summary().to_string());
    lines
}

/// Render a table as one string, and clear its dirty flag.
pub fn render_text<R: TableRow>(table: &Table<R>) -> String {
    let text = render_lines(table).join("\n");
    table.clear_dirty();
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("Ada Lovelace", 6), "Ada L…");
        assert_eq!(truncate_to_width("Ada", 6), "Ada");
        assert_eq!(truncate_to_width("Ada", 0), "");
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(align_to_width("日本", 6, Alignment::Right), "  日本");
    }

    #[test]
    fn center_alignment_pads_both_sides() {
        assert_eq!(align_to_width("ab", 6, Alignment::Center), "  ab  ");
        assert_eq!(align_to_width("ab", 5, Alignment::Center), " ab  ");
    }
}
