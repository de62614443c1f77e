//! Kanban board rendering widget.
//!
//! This module renders the five columns side by side and maps screen
//! positions back to columns and cards for mouse handling. Rendering and
//! hit-testing share [`lane_areas`] and the lane block geometry, so a click
//! always lands on the card that was drawn there.

use corkboard_config::Config;
use corkboard_protocol::{KanbanBoard, Status, TaskId};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
};

use super::lane::{LanePosition, calculate_scroll_offset, lane_block, render_lane};
use crate::layout::{LANE_COUNT, TASK_CARD_HEIGHT};
use crate::state::AppState;
use crate::theme::Palette;

/// Everything needed to draw the board.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    /// Columns and retained records.
    pub board: &'a KanbanBoard,
    /// Index of the focused column (0-4).
    pub selected_lane: usize,
    /// Index of the selected card within the focused column, if any.
    pub selected_task: Option<usize>,
    /// Column highlighted as the drop target.
    pub drop_target: Option<Status>,
    /// Card being carried.
    pub dragging: Option<&'a TaskId>,
    /// Colors.
    pub palette: Palette,
    /// Source of avatar badges.
    pub config: &'a Config,
}

impl<'a> BoardView<'a> {
    /// Creates a view with nothing selected.
    #[must_use]
    pub fn new(board: &'a KanbanBoard, config: &'a Config) -> Self {
        Self {
            board,
            selected_lane: 0,
            selected_task: None,
            drop_target: None,
            dragging: None,
            palette: Palette::default(),
            config,
        }
    }

    /// Creates the view of an application state.
    #[must_use]
    pub fn from_state(state: &'a AppState, config: &'a Config) -> Self {
        Self {
            board: &state.board,
            selected_lane: state.selected_lane,
            selected_task: state.selected_task,
            drop_target: state.drag.target(),
            dragging: state.drag.payload(),
            palette: state.palette(),
            config,
        }
    }

    /// Returns the selection within a column, if it is the focused one.
    pub(crate) fn selection_in(&self, status: Status) -> Option<usize> {
        if self.selected_lane == status.index() {
            self.selected_task
        } else {
            None
        }
    }
}

/// Splits the board area into five equal columns.
#[must_use]
pub fn lane_areas(area: Rect) -> [Rect; LANE_COUNT] {
    Layout::horizontal([Constraint::Ratio(1, LANE_COUNT as u32); LANE_COUNT]).areas(area)
}

const fn lane_position(index: usize) -> LanePosition {
    if index == 0 {
        LanePosition::First
    } else if index == LANE_COUNT - 1 {
        LanePosition::Last
    } else {
        LanePosition::Middle
    }
}

/// Renders the complete Kanban board to the buffer.
///
/// The board displays five columns (Backlog, To Do, In Progress, Blocked,
/// Done) arranged horizontally with equal widths, over the backdrop color.
///
/// # Layout
///
/// ```text
/// ╭ Backlog ─┬ To Do ──┬ In Prog ─┬ Blocked ─┬ Done ───╮
/// │┌───────┐ │┌──────┐ │          │          │         │
/// ││Task 1 │ ││Task 3│ │          │          │         │
/// ╰──────────┴─────────┴──────────┴──────────┴─────────╯
/// ```
///
/// # Examples
///
/// ```
/// use corkboard_config::Config;
/// use corkboard_protocol::KanbanBoard;
/// use corkboard_tui::widgets::{BoardView, render_board};
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let board = KanbanBoard::new();
/// let config = Config::default();
///
/// let area = Rect::new(0, 0, 100, 20);
/// let mut buf = Buffer::empty(area);
///
/// render_board(&BoardView::new(&board, &config), area, &mut buf);
/// ```
pub fn render_board(view: &BoardView<'_>, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, view.palette.base());

    let areas = lane_areas(area);
    for (i, lane) in view.board.lanes().iter().enumerate() {
        render_lane(lane, view, areas[i], buf, lane_position(i));
    }
}

/// Returns the column under a screen position.
///
/// # Examples
///
/// ```
/// use corkboard_protocol::Status;
/// use corkboard_tui::widgets::column_at;
/// use ratatui::layout::Rect;
///
/// let area = Rect::new(0, 3, 100, 20);
/// assert_eq!(column_at(area, 5, 10), Some(Status::Backlog));
/// assert_eq!(column_at(area, 95, 10), Some(Status::Done));
/// assert_eq!(column_at(area, 5, 1), None);
/// ```
#[must_use]
pub fn column_at(area: Rect, column: u16, row: u16) -> Option<Status> {
    let pos = Position::new(column, row);
    lane_areas(area)
        .iter()
        .position(|lane| lane.contains(pos))
        .and_then(Status::from_index)
}

/// Returns the column and card index under a screen position.
///
/// Accounts for the lane border and for the scroll offset of the focused
/// column. Returns `None` over borders, placeholders and empty space.
#[must_use]
pub fn card_at(view: &BoardView<'_>, area: Rect, column: u16, row: u16) -> Option<(Status, usize)> {
    let status = column_at(area, column, row)?;
    let index = status.index();
    let lane_area = lane_areas(area)[index];
    let inner = lane_block(lane_position(index)).inner(lane_area);
    if !inner.contains(Position::new(column, row)) {
        return None;
    }

    let lane = view.board.lane(status);
    let visible = (inner.height / TASK_CARD_HEIGHT).max(1) as usize;
    let slot = ((row - inner.y) / TASK_CARD_HEIGHT) as usize;
    if slot >= visible {
        return None;
    }

    let offset = calculate_scroll_offset(view.selection_in(status), lane.len(), visible);
    let card = offset + slot;
    (card < lane.len()).then_some((status, card))
}
