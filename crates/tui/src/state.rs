//! Application state management.
//!
//! [`AppState`] is the session object for one run of the board: the column
//! view and retained records, selection, the open modal, the drag gesture,
//! and appearance. It is created when the app starts and dropped when it
//! exits; nothing in it is global.

use corkboard_client::FetchedTasks;
use corkboard_config::{Backdrop, Theme};
use corkboard_protocol::{KanbanBoard, Lane, Status, Task, TaskId};
use tracing::debug;

use crate::drag::DragState;
use crate::layout::LANE_COUNT;
use crate::modal::ModalState;
use crate::theme::Palette;

/// The current focus area in the UI.
///
/// Determines which key bindings apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Focus is on the board columns.
    #[default]
    Board,
    /// A keyboard drag is choosing its target column.
    Drag,
    /// The task modal is open.
    Modal,
}

/// The application state.
///
/// Contains all mutable state for the TUI application including
/// the board data, selection tracking and the modal form.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The board being displayed.
    pub board: KanbanBoard,
    /// Index of the currently selected column (0-4).
    pub selected_lane: usize,
    /// Index of the selected card within the current column, if any.
    pub selected_task: Option<usize>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Current palette choice.
    pub theme: Theme,
    /// Current backdrop choice.
    pub backdrop: Backdrop,
    /// The open modal, if any.
    pub modal: Option<ModalState>,
    /// The drag gesture in progress.
    pub drag: DragState,
    /// Ticket of the last refresh applied to the board.
    last_ticket: u64,
}

impl AppState {
    /// Creates a new application state with the given board.
    ///
    /// Initializes with focus on the board, selecting the first column.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::KanbanBoard;
    /// use corkboard_tui::AppState;
    ///
    /// let state = AppState::new(KanbanBoard::new());
    /// assert_eq!(state.selected_lane, 0);
    /// assert!(state.modal.is_none());
    /// ```
    #[must_use]
    pub fn new(board: KanbanBoard) -> Self {
        Self {
            board,
            selected_lane: 0,
            selected_task: None,
            help_visible: false,
            theme: Theme::default(),
            backdrop: Backdrop::default(),
            modal: None,
            drag: DragState::default(),
            last_ticket: 0,
        }
    }

    /// Returns where key input goes.
    #[must_use]
    pub fn focus(&self) -> Focus {
        if self.modal.is_some() {
            Focus::Modal
        } else if self.drag.is_keyboard_drag() {
            Focus::Drag
        } else {
            Focus::Board
        }
    }

    /// Returns the palette for the current theme and backdrop.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::new(self.theme, self.backdrop)
    }

    /// Returns the status of the selected column.
    #[must_use]
    pub fn selected_status(&self) -> Status {
        Status::from_index(self.selected_lane).unwrap_or_default()
    }

    fn selected_lane_ref(&self) -> &Lane {
        self.board.lane(self.selected_status())
    }

    /// Returns the ticket of the last refresh applied.
    #[must_use]
    pub fn last_ticket(&self) -> u64 {
        self.last_ticket
    }

    /// Rebuilds the board from a completed refresh.
    ///
    /// A refresh older than the last applied one is ignored, as is one that
    /// failed (`tasks` is `None`): the board keeps what it shows. Returns
    /// `true` if the board was rebuilt.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_client::FetchedTasks;
    /// use corkboard_protocol::KanbanBoard;
    /// use corkboard_tui::AppState;
    ///
    /// let mut state = AppState::new(KanbanBoard::new());
    /// assert!(state.apply_refresh(2, Some(FetchedTasks::default())));
    /// assert!(!state.apply_refresh(1, Some(FetchedTasks::default())));
    /// assert!(!state.apply_refresh(3, None));
    /// assert_eq!(state.last_ticket(), 2);
    /// ```
    pub fn apply_refresh(&mut self, ticket: u64, tasks: Option<FetchedTasks>) -> bool {
        if ticket <= self.last_ticket {
            debug!(ticket, last = self.last_ticket, "ignoring stale refresh");
            return false;
        }
        let Some(fetched) = tasks else {
            debug!(ticket, "refresh returned no data, keeping board");
            return false;
        };

        self.board.rebuild(fetched.tasks);
        self.last_ticket = ticket;
        self.clamp_task_selection();
        true
    }

    /// Toggles the help overlay visibility.
    ///
    /// When help is shown, other interactions are blocked until
    /// help is dismissed.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed,
    /// `false` if help was not visible.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        if self.help_visible {
            self.help_visible = false;
            true
        } else {
            false
        }
    }

    /// Moves the column selection to the left, wrapping around if needed.
    pub fn navigate_left(&mut self) {
        if self.selected_lane > 0 {
            self.selected_lane -= 1;
        } else {
            self.selected_lane = LANE_COUNT - 1;
        }
        self.clamp_task_selection();
    }

    /// Moves the column selection to the right, wrapping around if needed.
    pub fn navigate_right(&mut self) {
        if self.selected_lane < LANE_COUNT - 1 {
            self.selected_lane += 1;
        } else {
            self.selected_lane = 0;
        }
        self.clamp_task_selection();
    }

    /// Moves the card selection up within the current column.
    pub fn navigate_up(&mut self) {
        let lane = self.selected_lane_ref();
        if lane.is_empty() {
            self.selected_task = None;
            return;
        }

        match self.selected_task {
            Some(idx) if idx > 0 => {
                self.selected_task = Some(idx - 1);
            }
            Some(_) => {
                // Wrap to bottom
                self.selected_task = Some(lane.len().saturating_sub(1));
            }
            None => {
                self.selected_task = Some(0);
            }
        }
    }

    /// Moves the card selection down within the current column.
    pub fn navigate_down(&mut self) {
        let lane = self.selected_lane_ref();
        if lane.is_empty() {
            self.selected_task = None;
            return;
        }

        let max_idx = lane.len().saturating_sub(1);
        match self.selected_task {
            Some(idx) if idx < max_idx => {
                self.selected_task = Some(idx + 1);
            }
            Some(_) | None => {
                self.selected_task = Some(0);
            }
        }
    }

    /// Selects a card by column and position.
    pub fn select(&mut self, status: Status, index: usize) {
        self.selected_lane = status.index();
        self.selected_task = Some(index);
        self.clamp_task_selection();
    }

    /// Selects the card with the given id, if it is on the board.
    pub fn select_id(&mut self, id: &TaskId) {
        let Some(status) = self.board.placement(id) else {
            return;
        };
        if let Some(index) = self.board.lane(status).cards.iter().position(|c| c == id) {
            self.select(status, index);
        }
    }

    /// Returns the retained record of the selected card, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::{KanbanBoard, Priority, Status, Task, TaskId};
    /// use corkboard_tui::AppState;
    ///
    /// let mut board = KanbanBoard::new();
    /// board.rebuild([Task {
    ///     id: TaskId::from(1),
    ///     title: "Task 1".into(),
    ///     description: String::new(),
    ///     assigned_to: String::new(),
    ///     priority: Priority::Low,
    ///     status: Status::Backlog,
    ///     end_date: String::new(),
    /// }]);
    ///
    /// let mut state = AppState::new(board);
    /// assert!(state.selected_task().is_none());
    ///
    /// state.navigate_down();
    /// assert_eq!(state.selected_task().unwrap().title, "Task 1");
    /// ```
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        let idx = self.selected_task?;
        self.board.task_at(self.selected_status(), idx)
    }

    /// Clears the current card selection.
    pub fn clear_selection(&mut self) {
        self.selected_task = None;
    }

    /// Ensures the card selection is valid for the current column.
    fn clamp_task_selection(&mut self) {
        let lane = self.selected_lane_ref();
        if lane.is_empty() {
            self.selected_task = None;
        } else if let Some(idx) = self.selected_task
            && idx >= lane.len()
        {
            self.selected_task = Some(lane.len().saturating_sub(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corkboard_protocol::Priority;

    fn task(id: u64, title: &str, status: Status) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.to_string(),
            description: String::new(),
            assigned_to: "Persona1".to_string(),
            priority: Priority::Low,
            status,
            end_date: String::new(),
        }
    }

    fn state_with(tasks: Vec<Task>) -> AppState {
        let mut board = KanbanBoard::new();
        board.rebuild(tasks);
        AppState::new(board)
    }

    fn fetched(tasks: Vec<Task>) -> Option<FetchedTasks> {
        Some(FetchedTasks { tasks, rejected: 0 })
    }

    #[test]
    fn new_state_has_correct_defaults() {
        let state = AppState::new(KanbanBoard::new());

        assert_eq!(state.focus(), Focus::Board);
        assert_eq!(state.selected_lane, 0);
        assert_eq!(state.selected_task, None);
        assert!(!state.help_visible);
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.last_ticket(), 0);
    }

    #[test]
    fn navigate_left_wraps_around() {
        let mut state = AppState::new(KanbanBoard::new());

        state.navigate_left();
        assert_eq!(state.selected_lane, 4);
        assert_eq!(state.selected_status(), Status::Done);

        state.navigate_left();
        assert_eq!(state.selected_lane, 3);
    }

    #[test]
    fn navigate_right_wraps_around() {
        let mut state = AppState::new(KanbanBoard::new());

        state.selected_lane = 4;
        state.navigate_right();
        assert_eq!(state.selected_lane, 0);
    }

    #[test]
    fn navigate_up_down_in_empty_lane() {
        let mut state = AppState::new(KanbanBoard::new());

        state.navigate_up();
        assert_eq!(state.selected_task, None);

        state.navigate_down();
        assert_eq!(state.selected_task, None);
    }

    #[test]
    fn navigate_up_down_with_tasks() {
        let mut state = state_with(vec![
            task(1, "Task 1", Status::Backlog),
            task(2, "Task 2", Status::Backlog),
            task(3, "Task 3", Status::Backlog),
        ]);

        state.navigate_down();
        assert_eq!(state.selected_task, Some(0));
        state.navigate_down();
        state.navigate_down();
        assert_eq!(state.selected_task, Some(2));

        // Wrap around
        state.navigate_down();
        assert_eq!(state.selected_task, Some(0));
        state.navigate_up();
        assert_eq!(state.selected_task, Some(2));
    }

    #[test]
    fn navigating_to_shorter_lane_clamps_selection() {
        let mut state = state_with(vec![
            task(1, "A", Status::Backlog),
            task(2, "B", Status::Backlog),
            task(3, "C", Status::Todo),
        ]);
        state.selected_task = Some(1);

        state.navigate_right();
        assert_eq!(state.selected_task, Some(0));
        assert_eq!(state.selected_task().unwrap().title, "C");

        state.navigate_right();
        assert_eq!(state.selected_task, None);
    }

    #[test]
    fn select_id_finds_card() {
        let mut state = state_with(vec![
            task(1, "A", Status::Blocked),
            task(2, "B", Status::Blocked),
        ]);

        state.select_id(&TaskId::from(2));
        assert_eq!(state.selected_status(), Status::Blocked);
        assert_eq!(state.selected_task, Some(1));

        state.select_id(&TaskId::from(9));
        assert_eq!(state.selected_task, Some(1));
    }

    #[test]
    fn refresh_rebuilds_board() {
        let mut state = AppState::new(KanbanBoard::new());

        assert!(state.apply_refresh(1, fetched(vec![task(1, "A", Status::Done)])));
        assert_eq!(state.board.placement(&TaskId::from(1)), Some(Status::Done));
        assert_eq!(state.last_ticket(), 1);
    }

    #[test]
    fn stale_refresh_never_replaces_newer_board() {
        let mut state = AppState::new(KanbanBoard::new());

        state.apply_refresh(2, fetched(vec![task(1, "New", Status::Done)]));
        let applied = state.apply_refresh(1, fetched(vec![task(1, "Old", Status::Todo)]));

        assert!(!applied);
        assert_eq!(state.board.record(&TaskId::from(1)).unwrap().title, "New");
        assert_eq!(state.board.placement(&TaskId::from(1)), Some(Status::Done));
    }

    #[test]
    fn failed_refresh_keeps_board() {
        let mut state = AppState::new(KanbanBoard::new());
        state.apply_refresh(1, fetched(vec![task(1, "A", Status::Todo)]));

        assert!(!state.apply_refresh(2, None));
        assert_eq!(state.board.total_cards(), 1);
        assert_eq!(state.last_ticket(), 1);

        // A later success still applies.
        assert!(state.apply_refresh(3, fetched(Vec::new())));
        assert!(state.board.is_empty());
    }

    #[test]
    fn refresh_clamps_selection() {
        let mut state = state_with(vec![
            task(1, "A", Status::Backlog),
            task(2, "B", Status::Backlog),
        ]);
        state.selected_task = Some(1);

        state.apply_refresh(1, fetched(vec![task(1, "A", Status::Backlog)]));
        assert_eq!(state.selected_task, Some(0));
    }

    #[test]
    fn focus_follows_modal_and_keyboard_drag() {
        let mut state = state_with(vec![task(1, "A", Status::Todo)]);

        state
            .drag
            .begin(TaskId::from(1), Status::Todo, crate::drag::DragSource::Keyboard);
        assert_eq!(state.focus(), Focus::Drag);

        state.drag.cancel();
        state.modal = Some(ModalState::create(&[]));
        assert_eq!(state.focus(), Focus::Modal);
    }

    #[test]
    fn selected_task_returns_none_for_empty_lane() {
        let mut state = AppState::new(KanbanBoard::new());
        state.selected_task = Some(0);

        assert!(state.selected_task().is_none());
    }

    #[test]
    fn toggle_help_visibility() {
        let mut state = AppState::new(KanbanBoard::new());

        state.toggle_help();
        assert!(state.help_visible);

        state.toggle_help();
        assert!(!state.help_visible);
    }

    #[test]
    fn dismiss_help_reports_whether_it_was_visible() {
        let mut state = AppState::new(KanbanBoard::new());

        assert!(!state.dismiss_help());
        state.help_visible = true;
        assert!(state.dismiss_help());
        assert!(!state.help_visible);
    }

    #[test]
    fn clear_selection_removes_task_selection() {
        let mut state = state_with(vec![task(1, "A", Status::Backlog)]);
        state.navigate_down();
        assert!(state.selected_task.is_some());

        state.clear_selection();
        assert!(state.selected_task.is_none());
    }
}
