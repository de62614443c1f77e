//! Help overlay widget.
//!
//! This module provides the help overlay that displays all available keybindings
//! when the user presses `?`.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::theme::Palette;

/// The width of the help overlay panel.
pub(crate) const HELP_WIDTH: u16 = 36;

/// The height of the help overlay panel.
pub(crate) const HELP_HEIGHT: u16 = 24;

/// Key column, then description.
const BINDINGS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Navigation",
        &[
            ("←", "Move left"),
            ("→", "Move right"),
            ("↑", "Select previous"),
            ("↓", "Select next"),
        ],
    ),
    (
        "Tasks",
        &[
            ("Enter", "Edit task"),
            ("a", "New task"),
            ("m", "Move task"),
            ("Mouse", "Click to edit, drag"),
        ],
    ),
    (
        "Board",
        &[
            ("t", "Toggle theme"),
            ("b", "Cycle backdrop"),
            ("r", "Refresh"),
            ("Esc", "Cancel"),
            ("Ctrl+C", "Quit"),
            ("?", "Toggle help"),
        ],
    ),
];

/// Renders a centered help overlay displaying all keybindings.
///
/// The overlay is rendered on top of the existing content, clearing the
/// area behind it first.
///
/// # Examples
///
/// ```
/// use corkboard_tui::theme::Palette;
/// use corkboard_tui::widgets::render_help_overlay;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let area = Rect::new(0, 0, 80, 30);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(&Palette::default(), area, &mut buf);
/// ```
pub fn render_help_overlay(palette: &Palette, area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(HELP_WIDTH, HELP_HEIGHT, area);

    Clear.render(popup_area, buf);

    let help_block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(palette.overlay)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.overlay));

    let help_text = Paragraph::new(build_help_lines(palette))
        .block(help_block)
        .style(palette.base())
        .alignment(Alignment::Left);

    help_text.render(popup_area, buf);
}

/// Builds the lines of help content.
fn build_help_lines(palette: &Palette) -> Vec<Line<'static>> {
    let header_style = palette.heading();
    let key_style = Style::default().fg(palette.accent);
    let text_style = Style::default().fg(palette.text);

    let mut lines = vec![Line::from("")];
    for (section, keys) in BINDINGS {
        lines.push(Line::from(Span::styled(format!("  {section}"), header_style)));
        for (key, action) in keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<11}"), key_style),
                Span::styled(*action, text_style),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        palette.hint(),
    )));
    lines
}

/// Creates a centered rectangle within a given area.
///
/// If the requested dimensions exceed the available area, the rectangle
/// will be clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}
