//! Six-cell row widget.
//!
//! Each cell is three rows tall: a blank pad, the centered text, and an
//! underline bar. The focused cell is highlighted and gets the terminal
//! cursor, which is re-placed on every draw.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use codebox_engine::{CODE_LENGTH, CharCell, CodeEntryRow, SlotIndex};

use crate::theme::{Glyphs, Palette, styles};

pub const CELL_WIDTH: u16 = 5;
pub const CELL_HEIGHT: u16 = 3;
pub const CELL_GAP: u16 = 2;
pub const ROW_WIDTH: u16 = CELL_WIDTH * CODE_LENGTH as u16 + CELL_GAP * (CODE_LENGTH as u16 - 1);

/// Positions of the six cells, centered horizontally within `area`.
#[must_use]
pub fn cell_areas(area: Rect) -> [Rect; CODE_LENGTH] {
    let left = area.x + area.width.saturating_sub(ROW_WIDTH) / 2;
    std::array::from_fn(|i| {
        let x = left + i as u16 * (CELL_WIDTH + CELL_GAP);
        Rect::new(x, area.y, CELL_WIDTH, CELL_HEIGHT.min(area.height)).intersection(area)
    })
}

/// Where the cursor sits when `index` has focus: the middle column of the
/// text line.
#[must_use]
pub fn cursor_position(area: Rect, index: SlotIndex) -> Position {
    let cell = cell_areas(area)[index.get()];
    Position::new(cell.x + CELL_WIDTH / 2, cell.y + 1)
}

pub struct CodeRow<'a> {
    row: &'a CodeEntryRow,
    palette: &'a Palette,
    glyphs: &'a Glyphs,
}

impl<'a> CodeRow<'a> {
    #[must_use]
    pub fn new(row: &'a CodeEntryRow, palette: &'a Palette, glyphs: &'a Glyphs) -> Self {
        Self {
            row,
            palette,
            glyphs,
        }
    }

    fn render_cell(&self, cell: &CharCell, focused: bool, area: Rect, buf: &mut Buffer) {
        let text_style = styles::cell_text(self.palette, focused);
        let underline = self.glyphs.underline.repeat(usize::from(CELL_WIDTH));
        let lines = vec![
            Line::raw(""),
            Line::styled(fit_to_cell(cell.text(), self.glyphs.ellipsis), text_style).centered(),
            Line::styled(underline, styles::cell_underline(self.palette, focused)),
        ];
        Paragraph::new(lines)
            .style(Style::default().bg(text_style.bg.unwrap_or(self.palette.bg_panel)))
            .render(area, buf);
    }
}

impl Widget for CodeRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (index, cell_area) in SlotIndex::all().zip(cell_areas(area)) {
            if cell_area.is_empty() {
                continue;
            }
            let focused = self.row.is_focused(index);
            self.render_cell(self.row.cell(index), focused, cell_area, buf);
        }
    }
}

/// Truncates `text` to the cell width, marking overflow with `ellipsis`.
///
/// Only pasted text can be wider than one column. Control characters are
/// dropped so a pasted newline cannot break the row.
#[must_use]
pub fn fit_to_cell(text: &str, ellipsis: &str) -> String {
    let text: String = text.chars().filter(|c| !c.is_control()).collect();
    let max = usize::from(CELL_WIDTH);
    if text.width() <= max {
        return text;
    }

    let budget = max.saturating_sub(ellipsis.width());
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push_str(ellipsis);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_is_forty_columns() {
        assert_eq!(ROW_WIDTH, 40);
    }

    #[test]
    fn cells_are_centered_and_spaced() {
        let areas = cell_areas(Rect::new(0, 0, 46, 3));
        assert_eq!(areas[0], Rect::new(3, 0, 5, 3));
        assert_eq!(areas[1].x, 10);
        assert_eq!(areas[5], Rect::new(38, 0, 5, 3));
    }

    #[test]
    fn cursor_sits_on_text_line() {
        let area = Rect::new(7, 6, 46, 3);
        let pos = cursor_position(area, SlotIndex::new(1).unwrap());
        assert_eq!(pos, Position::new(19, 7));
    }

    #[test]
    fn fit_keeps_short_text() {
        assert_eq!(fit_to_cell("7", "…"), "7");
        assert_eq!(fit_to_cell("", "…"), "");
        assert_eq!(fit_to_cell("12345", "…"), "12345");
    }

    #[test]
    fn fit_truncates_pastes() {
        assert_eq!(fit_to_cell("123456789", "…"), "1234…");
        assert_eq!(fit_to_cell("123456789", "~"), "1234~");
        assert_eq!(fit_to_cell("12\n34", "…"), "1234");
    }

    #[test]
    fn focused_cell_is_highlighted() {
        let row = CodeEntryRow::new();
        let palette = Palette::standard();
        let glyphs = crate::glyphs(codebox_engine::UiOptions::default());
        let area = Rect::new(0, 0, ROW_WIDTH, CELL_HEIGHT);
        let mut buf = Buffer::empty(area);

        CodeRow::new(&row, &palette, &glyphs).render(area, &mut buf);

        assert_eq!(buf[(2, 1)].bg, palette.bg_highlight);
        assert_eq!(buf[(9, 1)].bg, palette.bg_panel);
        assert_eq!(buf[(0, 2)].symbol(), "━");
        assert_eq!(buf[(0, 2)].fg, palette.accent);
        assert_eq!(buf[(7, 2)].fg, palette.underline);
    }

    #[test]
    fn cell_text_is_centered() {
        let mut row = CodeEntryRow::new();
        row.edit(SlotIndex::FIRST, "4");
        let palette = Palette::standard();
        let glyphs = crate::glyphs(codebox_engine::UiOptions::default());
        let area = Rect::new(0, 0, ROW_WIDTH, CELL_HEIGHT);
        let mut buf = Buffer::empty(area);

        CodeRow::new(&row, &palette, &glyphs).render(area, &mut buf);

        assert_eq!(buf[(2, 1)].symbol(), "4");
    }
}
