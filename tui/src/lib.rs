//! TUI rendering for Codebox using ratatui.

mod code_row;
mod input;
mod theme;

pub use code_row::{
    CELL_GAP, CELL_HEIGHT, CELL_WIDTH, CodeRow, ROW_WIDTH, cell_areas, cursor_position,
    fit_to_cell,
};
pub use input::{InputPump, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use codebox_engine::App;

pub const PANEL_WIDTH: u16 = 48;
pub const PANEL_HEIGHT: u16 = 10;

const TITLE: &str = " Verification Code ";

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let panel = centered(frame.area(), PANEL_WIDTH, PANEL_HEIGHT);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(TITLE)
        .title_style(styles::button(&palette))
        .style(Style::default().bg(palette.bg_panel));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Set Codes button
            Constraint::Length(1),           // Spacer
            Constraint::Length(CELL_HEIGHT), // Cells
            Constraint::Length(1),           // Spacer
            Constraint::Length(1),           // Status
            Constraint::Length(1),           // Key hints
        ])
        .split(inner);

    draw_set_codes_button(frame, chunks[0], &palette);
    frame.render_widget(CodeRow::new(app.entry(), &palette, &glyphs), chunks[2]);
    draw_status(frame, app, chunks[4], &palette, &glyphs);
    draw_key_hints(frame, chunks[5], &palette, &glyphs);

    // The focused cell claims the cursor on every frame, not just when focus moves.
    if let Some(index) = app.entry().focused() {
        frame.set_cursor_position(cursor_position(chunks[2], index));
    }
}

fn draw_set_codes_button(frame: &mut Frame, area: Rect, palette: &Palette) {
    let line = Line::from(vec![
        Span::styled("[ Set Codes ]", styles::button(palette)),
        Span::raw("  "),
        Span::styled("Ctrl+S", styles::key_hint(palette)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let line = match app.completed_code() {
        Some(code) => Line::styled(
            format!("{} Code {code}", glyphs.complete),
            styles::success(palette),
        ),
        None => Line::styled("Enter the verification code", styles::muted(palette)),
    };
    frame.render_widget(Paragraph::new(line.centered()), area);
}

fn draw_key_hints(frame: &mut Frame, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let key = styles::key_hint(palette);
    let muted = styles::muted(palette);
    let sep = format!(" {} ", glyphs.separator);
    let line = Line::from(vec![
        Span::styled("Tab", key),
        Span::styled(" move", muted),
        Span::styled(sep.clone(), muted),
        Span::styled("Ctrl+U", key),
        Span::styled(" clear", muted),
        Span::styled(sep, muted),
        Span::styled("Esc", key),
        Span::styled(" quit", muted),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), area);
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
