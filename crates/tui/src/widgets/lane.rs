//! Lane rendering widget.
//!
//! This module provides functions for rendering a single board column with
//! its header and card list.

use corkboard_protocol::Lane;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::board::BoardView;
use super::task_card::render_task_card;
use crate::layout::TASK_CARD_HEIGHT;

/// Position of a lane in the horizontal layout.
///
/// Used to determine which borders to render for each lane, enabling
/// collapsed borders between adjacent lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanePosition {
    /// First (leftmost) lane - has left border with rounded corners.
    First,
    /// Middle lanes - has left border with T-connectors.
    Middle,
    /// Last (rightmost) lane - has both borders, rounded on right.
    Last,
}

/// First lane: rounded corners on the left, no right border.
const BORDER_SET_FIRST: border::Set = border::Set {
    top_left: "╭",
    top_right: "─",
    bottom_left: "╰",
    bottom_right: "─",
    vertical_left: "│",
    vertical_right: " ",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Middle lanes: T-connectors on the left, no right border.
const BORDER_SET_MIDDLE: border::Set = border::Set {
    top_left: "┬",
    top_right: "─",
    bottom_left: "┴",
    bottom_right: "─",
    vertical_left: "│",
    vertical_right: " ",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Last lane: T-connectors on the left, rounded on the right.
const BORDER_SET_LAST: border::Set = border::Set {
    top_left: "┬",
    top_right: "╮",
    bottom_left: "┴",
    bottom_right: "╯",
    vertical_left: "│",
    vertical_right: "│",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Returns the unstyled block framing a lane.
///
/// Adjacent lanes share one vertical border: every lane draws its left
/// edge and only the last one draws a right edge.
pub(crate) fn lane_block(position: LanePosition) -> Block<'static> {
    let (borders, border_set) = match position {
        LanePosition::First => (Borders::TOP | Borders::BOTTOM | Borders::LEFT, BORDER_SET_FIRST),
        LanePosition::Middle => (Borders::TOP | Borders::BOTTOM | Borders::LEFT, BORDER_SET_MIDDLE),
        LanePosition::Last => (Borders::ALL, BORDER_SET_LAST),
    };
    Block::default().borders(borders).border_set(border_set)
}

/// Renders a single lane to the buffer.
///
/// A lane displays its header (name and card count) followed by a vertical
/// list of task cards. Empty lanes show a "No tasks" placeholder message.
/// While a drag is in progress, the target lane is outlined in the drop
/// color and the carried card is dimmed.
///
/// # Arguments
///
/// * `lane` - The lane to render
/// * `view` - Board-wide selection, drag and color state
/// * `area` - The rectangular area to render into
/// * `buf` - The buffer to render into
/// * `position` - The lane's position in the horizontal layout
pub fn render_lane(
    lane: &Lane,
    view: &BoardView<'_>,
    area: Rect,
    buf: &mut Buffer,
    position: LanePosition,
) {
    let palette = &view.palette;
    let index = lane.status.index();
    let is_focused = view.selected_lane == index;
    let prev_focused = index > 0 && view.selected_lane == index - 1;
    let is_drop_target = view.drop_target == Some(lane.status);
    let selected_idx = view.selection_in(lane.status);

    let (border_style, title_style) = if is_drop_target {
        let style = Style::default()
            .fg(palette.drop_target)
            .add_modifier(Modifier::BOLD);
        (style, style)
    } else if is_focused {
        (Style::default().fg(palette.accent), palette.heading())
    } else {
        (
            Style::default().fg(palette.muted),
            Style::default().fg(palette.text),
        )
    };

    let title = format!("{} ({})", lane.status.display_name(), lane.len());
    let block = lane_block(position)
        .title(Span::styled(title, title_style))
        .border_style(border_style);

    let inner_area = block.inner(area);
    block.render(area, buf);

    // The left border is shared with the previous lane; keep it highlighted
    // when that lane has focus.
    if prev_focused && !is_focused && !is_drop_target && area.width > 0 {
        let highlight_style = Style::default().fg(palette.accent);
        let x = area.x;
        for y in area.y..area.y.saturating_add(area.height) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(highlight_style);
            }
        }
    }

    if lane.is_empty() {
        render_empty_placeholder(view, inner_area, buf);
        return;
    }

    // Calculate how many cards can fit in the visible area
    let visible_tasks = (inner_area.height / TASK_CARD_HEIGHT).max(1) as usize;
    let scroll_offset = calculate_scroll_offset(selected_idx, lane.len(), visible_tasks);

    let task_count = lane.len().min(visible_tasks);
    let mut constraints: Vec<Constraint> = (0..task_count)
        .map(|_| Constraint::Length(TASK_CARD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));

    let task_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner_area);

    for (i, task_area) in task_areas.iter().take(task_count).enumerate() {
        let task_idx = scroll_offset + i;
        let Some(id) = lane.cards.get(task_idx) else {
            break;
        };
        let Some(task) = view.board.record(id) else {
            continue;
        };

        let is_selected = selected_idx == Some(task_idx);
        let avatar = view.config.avatar_for(&task.assigned_to);
        render_task_card(task, avatar, is_selected, palette, *task_area, buf);

        if view.dragging == Some(id) {
            buf.set_style(*task_area, Style::default().add_modifier(Modifier::DIM));
        }
    }
}

/// Renders a placeholder message for empty lanes.
fn render_empty_placeholder(view: &BoardView<'_>, area: Rect, buf: &mut Buffer) {
    let placeholder = Paragraph::new(Line::from(Span::styled("No tasks", view.palette.hint())));

    placeholder.render(area, buf);
}

/// Calculates the scroll offset to keep the selected card visible.
pub(crate) fn calculate_scroll_offset(
    selected_idx: Option<usize>,
    total_tasks: usize,
    visible_tasks: usize,
) -> usize {
    let Some(selected) = selected_idx else {
        return 0;
    };

    if total_tasks <= visible_tasks {
        return 0;
    }

    let max_offset = total_tasks.saturating_sub(visible_tasks);

    if selected < visible_tasks / 2 {
        0
    } else {
        (selected.saturating_sub(visible_tasks / 2)).min(max_offset)
    }
}
