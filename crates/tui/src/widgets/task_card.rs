//! Task card rendering widget.
//!
//! This module provides functions for rendering individual task cards. The
//! border color reflects the task's priority.

use corkboard_protocol::Task;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::{Palette, priority_color, priority_color_bright};

/// Renders a task card to the buffer.
///
/// The card is a pure function of the task fields: title, description,
/// then one line with the assignee's avatar badge, the assignee, the
/// priority and the deadline.
///
/// # Arguments
///
/// * `task` - The task to render
/// * `avatar` - The assignee's avatar badge
/// * `is_selected` - Whether this card is currently selected
/// * `palette` - Colors for the current theme
/// * `area` - The rectangular area to render into
/// * `buf` - The buffer to render into
///
/// # Layout
///
/// ```text
/// ┌────────────────────┐
/// │Fix bug             │
/// │Login fails on mo...│
/// │◆ Persona1 · High...│
/// └────────────────────┘
/// ```
///
/// # Examples
///
/// ```
/// use corkboard_protocol::{Priority, Status, Task, TaskId};
/// use corkboard_tui::theme::Palette;
/// use corkboard_tui::widgets::render_task_card;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let task = Task {
///     id: TaskId::from(1),
///     title: "Fix bug".into(),
///     description: String::new(),
///     assigned_to: "Persona1".into(),
///     priority: Priority::High,
///     status: Status::Todo,
///     end_date: "2024-01-01".into(),
/// };
/// let area = Rect::new(0, 0, 24, 5);
/// let mut buf = Buffer::empty(area);
///
/// render_task_card(&task, "◆", false, &Palette::default(), area, &mut buf);
/// ```
pub fn render_task_card(
    task: &Task,
    avatar: &str,
    is_selected: bool,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    // Skip rendering if area is too small
    if area.width < 4 || area.height < 3 {
        return;
    }

    let (border_color, title_style, desc_style) = if is_selected {
        (
            priority_color_bright(task.priority),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(palette.text),
        )
    } else {
        (
            priority_color(task.priority),
            Style::default().fg(palette.text),
            Style::default().fg(palette.muted),
        )
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let content = vec![
        Line::from(Span::styled(
            truncate_string(&task.title, inner_width),
            title_style,
        )),
        Line::from(Span::styled(
            truncate_string(&task.description, inner_width),
            desc_style,
        )),
        Line::from(Span::styled(
            truncate_string(&card_footer(task, avatar), inner_width),
            Style::default().fg(palette.muted),
        )),
    ];

    let card = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );

    card.render(area, buf);
}

/// Builds the assignee, priority and deadline line.
fn card_footer(task: &Task, avatar: &str) -> String {
    let mut footer = format!("{avatar} {} · {}", task.assigned_to, task.priority);
    if !task.end_date.is_empty() {
        footer.push_str(" · ");
        footer.push_str(&task.end_date);
    }
    footer
}

/// Truncates a string to fit within a given width, adding ellipsis if needed.
pub(crate) fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_width).collect()
    }
}
