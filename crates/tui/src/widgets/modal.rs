//! Task modal overlay widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::help::centered_rect;
use super::task_card::truncate_string;
use crate::modal::{Field, ModalMode, ModalState};
use crate::theme::Palette;

/// The width of the modal panel.
pub(crate) const MODAL_WIDTH: u16 = 56;

/// The height of the modal panel: borders, six fields, a spacer and hints.
pub(crate) const MODAL_HEIGHT: u16 = 11;

/// Width of the label column, including the focus marker.
const LABEL_WIDTH: usize = 15;

/// Renders the task form centered over `area`.
///
/// The focused field is marked with `▸`. Text fields show a cursor at the
/// end; choice fields show `‹ ›` arrows.
///
/// # Layout
///
/// ```text
/// ╭ Edit task 1 ─────────────────────────────────────────╮
/// │                                                      │
/// │ ▸ Title       Fix bug_                               │
/// │   Description Login fails on mobile                  │
/// │   Assignee    Persona1                               │
/// │   Priority    High                                   │
/// │   Status      To Do                                  │
/// │   Deadline    2024-01-01                             │
/// │                                                      │
/// │ Enter save · Esc cancel · Tab next · Ctrl+D delete   │
/// ╰──────────────────────────────────────────────────────╯
/// ```
pub fn render_modal(modal: &ModalState, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
    Clear.render(popup_area, buf);

    let title = match modal.mode() {
        ModalMode::Create => " New task ".to_string(),
        ModalMode::Edit(id) => format!(" Edit task {id} "),
    };
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(palette.overlay)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.overlay));

    let value_width = (popup_area.width as usize).saturating_sub(2 + LABEL_WIDTH + 1);
    let mut lines = vec![Line::from("")];
    lines.extend(
        Field::all()
            .into_iter()
            .map(|field| field_line(modal, field, value_width, palette)),
    );
    lines.push(Line::from(""));
    lines.push(hint_line(modal, palette));

    Paragraph::new(lines)
        .block(block)
        .style(palette.base())
        .render(popup_area, buf);
}

fn field_line(
    modal: &ModalState,
    field: Field,
    value_width: usize,
    palette: &Palette,
) -> Line<'static> {
    let focused = modal.focus() == field;
    let marker = if focused { "▸" } else { " " };
    let label_style = if focused {
        palette.heading()
    } else {
        Style::default().fg(palette.muted)
    };

    let raw = modal.value(field);
    let value = match (focused, field.is_text()) {
        (true, true) => {
            // Keep the end of long text visible while typing.
            let len = raw.chars().count();
            let keep = value_width.saturating_sub(1);
            let tail: String = raw.chars().skip(len.saturating_sub(keep)).collect();
            format!("{tail}_")
        }
        (true, false) => truncate_string(&format!("‹ {raw} ›"), value_width),
        (false, _) => truncate_string(raw, value_width),
    };

    Line::from(vec![
        Span::styled(
            format!(" {marker} {:<width$}", field.label(), width = LABEL_WIDTH - 3),
            label_style,
        ),
        Span::styled(value, Style::default().fg(palette.text)),
    ])
}

fn hint_line(modal: &ModalState, palette: &Palette) -> Line<'static> {
    let mut hint = " Enter save · Esc cancel · Tab next".to_string();
    if modal.current_id().is_some() {
        hint.push_str(" · Ctrl+D delete");
    }
    Line::from(Span::styled(hint, palette.hint()))
}
