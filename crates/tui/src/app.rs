//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle: input handling, state updates, rendering, and the
//! hand-off of every store call to a background [`Dispatcher`].

use std::sync::Arc;

use corkboard_client::{Dispatcher, SyncEvent, TaskStore};
use corkboard_config::Config;
use corkboard_protocol::{KanbanBoard, Message, TaskId};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    AppState, Focus,
    drag::{DragSource, DragState},
    event::{event_to_message, key_to_modal_message, poll_event},
    layout::{HEADER_HEIGHT, MIN_HEIGHT, MIN_HEIGHT_WITH_HEADER, MIN_WIDTH},
    modal::{ModalAction, ModalState},
    terminal::AppTerminal,
    widgets::{BoardView, card_at, column_at, render_board, render_help_overlay, render_modal},
};

/// The main application struct.
///
/// Owns the session state and the dispatcher, and provides the main event
/// loop.
#[derive(Debug)]
pub struct App {
    state: AppState,
    dispatcher: Dispatcher,
    events: mpsc::UnboundedReceiver<SyncEvent>,
    should_quit: bool,
    /// Last known terminal area, used for mouse hit-testing.
    last_area: Rect,
    /// Whether the header was shown in the last render (affects hit-testing).
    header_visible: bool,
    /// False while the "terminal too small" message replaces the board.
    board_visible: bool,
    /// The application configuration.
    config: Config,
}

impl App {
    /// Creates the application and requests the initial task list.
    ///
    /// The board starts empty and fills in when the first refresh arrives.
    /// Must be called from within a Tokio runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use corkboard_client::MemoryStore;
    /// use corkboard_config::Config;
    /// use corkboard_tui::App;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let app = App::new(Config::default(), Arc::new(MemoryStore::new()));
    /// assert!(app.state().board.is_empty());
    /// # }
    /// ```
    #[must_use]
    pub fn new(config: Config, store: Arc<dyn TaskStore>) -> Self {
        let (dispatcher, events) = Dispatcher::new(store);
        let mut state = AppState::new(KanbanBoard::new());
        state.theme = config.theme;
        state.backdrop = config.backdrop;

        dispatcher.refresh();
        Self {
            state,
            dispatcher,
            events,
            should_quit: false,
            last_area: Rect::default(),
            header_visible: true,
            board_visible: true,
            config,
        }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of store jobs still running.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.dispatcher.pending()
    }

    /// Updates the application state based on a message.
    ///
    /// When the help overlay is visible, most messages are intercepted to
    /// dismiss the help instead of their normal action. Otherwise the message
    /// goes to the modal, the keyboard drag, or the board, in that order of
    /// precedence. While the board is hidden by the "terminal too small"
    /// message, only quit and refresh are acted on.
    pub fn update(&mut self, msg: Message) {
        if msg == Message::Quit {
            self.should_quit = true;
            return;
        }

        if !self.board_visible {
            if msg == Message::Refresh {
                self.dispatcher.refresh();
            } else {
                debug!(?msg, "board hidden, input ignored");
            }
            return;
        }

        // When help is visible, most keys should dismiss it
        if self.state.help_visible {
            match msg {
                Message::ToggleHelp | Message::Escape => self.state.toggle_help(),
                _ => {
                    let _ = self.state.dismiss_help();
                }
            }
            return;
        }

        match self.state.focus() {
            Focus::Modal => self.update_modal(msg),
            Focus::Drag => self.update_keyboard_drag(msg),
            Focus::Board => self.update_board(msg),
        }
    }

    fn update_board(&mut self, msg: Message) {
        match msg {
            Message::Escape => {
                if !self.state.drag.cancel() {
                    self.state.clear_selection();
                }
            }
            Message::NavigateLeft => self.state.navigate_left(),
            Message::NavigateRight => self.state.navigate_right(),
            Message::NavigateUp => self.state.navigate_up(),
            Message::NavigateDown => self.state.navigate_down(),
            Message::Select => {
                if let Some(id) = self.state.selected_task().map(|task| task.id.clone()) {
                    self.open_edit(&id);
                }
            }
            Message::OpenCreate => {
                debug!("opening create form");
                self.state.modal = Some(ModalState::create(&self.config.people));
            }
            Message::BeginDrag => {
                if let Some(task) = self.state.selected_task() {
                    let id = task.id.clone();
                    let origin = self.state.selected_status();
                    self.state.drag.begin(id, origin, DragSource::Keyboard);
                }
            }
            Message::ToggleHelp => self.state.toggle_help(),
            Message::ToggleTheme => {
                self.state.theme = self.state.theme.toggled();
                info!(theme = self.state.theme.name(), "theme changed");
            }
            Message::CycleBackdrop => {
                self.state.backdrop = self.state.backdrop.cycled();
                info!(backdrop = self.state.backdrop.label(), "backdrop changed");
            }
            Message::Refresh => {
                debug!("manual refresh");
                self.dispatcher.refresh();
            }
            Message::ClickAt { column, row } => self.handle_press(column, row),
            Message::DragAt { column, row } => self.handle_pointer_drag(column, row),
            Message::ReleaseAt { column, row } => self.handle_release(column, row),
            // Modal messages only arrive while the modal is open
            _ => {}
        }
    }

    fn update_keyboard_drag(&mut self, msg: Message) {
        match msg {
            Message::NavigateLeft => self.state.drag.shift_target(false),
            Message::NavigateRight => self.state.drag.shift_target(true),
            Message::Select => self.drop_dragged(),
            Message::Escape => {
                let _ = self.state.drag.cancel();
            }
            _ => {}
        }
    }

    fn update_modal(&mut self, msg: Message) {
        let Some(modal) = self.state.modal.as_mut() else {
            return;
        };

        match msg {
            Message::ModalInput { ch } => modal.input(ch),
            Message::ModalBackspace => modal.backspace(),
            Message::ModalNextField => modal.next_field(),
            Message::ModalPrevField => modal.prev_field(),
            Message::ModalCycle { delta } => modal.cycle(delta, &self.config.people),
            Message::ModalSave => {
                if let Some(modal) = self.state.modal.take() {
                    self.dispatch(modal.save());
                }
            }
            Message::ModalDelete => {
                if let Some(action) = modal.delete() {
                    self.state.modal = None;
                    self.dispatch(action);
                }
            }
            Message::ModalCancel | Message::Escape => {
                debug!("modal closed without saving");
                self.state.modal = None;
            }
            _ => {}
        }
    }

    /// Opens the edit form for a card, with the status of its column.
    fn open_edit(&mut self, id: &TaskId) {
        let (Some(task), Some(placement)) =
            (self.state.board.record(id), self.state.board.placement(id))
        else {
            warn!(%id, "cannot edit a task that is not on the board");
            return;
        };
        debug!(%id, "opening edit form");
        self.state.modal = Some(ModalState::edit(task, placement));
    }

    fn dispatch(&mut self, action: ModalAction) {
        match action {
            ModalAction::Create(fields) => self.dispatcher.create(fields),
            ModalAction::Update(id, patch) => self.dispatcher.update(id, patch),
            ModalAction::Delete(id) => self.dispatcher.delete(id),
        }
    }

    /// Drops the carried card and sends its update.
    fn drop_dragged(&mut self) {
        // Aborts are logged by the controller
        if let Ok(request) = self.state.drag.drop_card(&mut self.state.board) {
            self.state.select_id(&request.id);
            self.dispatcher.update(request.id, request.patch);
        }
    }

    /// Returns the area the board was last drawn into.
    fn board_area(&self) -> Rect {
        let header_offset = if self.header_visible {
            HEADER_HEIGHT
        } else {
            0
        };
        Rect {
            x: self.last_area.x,
            y: self.last_area.y + header_offset,
            width: self.last_area.width,
            height: self.last_area.height.saturating_sub(header_offset),
        }
    }

    /// Handles the left button going down.
    ///
    /// Over a card, selects it and arms a click or drag.
    fn handle_press(&mut self, column: u16, row: u16) {
        let area = self.board_area();
        let view = BoardView::from_state(&self.state, &self.config);
        let Some((status, index)) = card_at(&view, area, column, row) else {
            return;
        };

        self.state.select(status, index);
        if let Some(task) = self.state.selected_task() {
            let id = task.id.clone();
            self.state.drag.press(id);
        }
    }

    /// Handles motion with the left button held.
    fn handle_pointer_drag(&mut self, column: u16, row: u16) {
        let over = column_at(self.board_area(), column, row);
        let origin = match &self.state.drag {
            DragState::Pressed { id } => self.state.board.placement(id),
            DragState::Idle | DragState::Dragging { .. } => None,
        };
        self.state.drag.pointer_moved(origin, over);
    }

    /// Handles the left button going up: a drop, or a click on a card.
    fn handle_release(&mut self, column: u16, row: u16) {
        if self.state.drag.is_dragging() {
            let over = column_at(self.board_area(), column, row);
            self.state.drag.hover(over);
            self.drop_dragged();
        } else if let Some(id) = self.state.drag.take_click() {
            self.open_edit(&id);
        }
    }

    /// Applies every completion event received so far.
    ///
    /// Returns the number of events handled.
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            handled += 1;
            match event {
                SyncEvent::Refreshed { ticket, tasks } => {
                    let _ = self.state.apply_refresh(ticket, tasks);
                }
                SyncEvent::Mutated { op, id, ok } => {
                    debug!(%op, id = ?id, ok, "mutation completed");
                }
            }
        }
        handled
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - If terminal is below minimum dimensions, shows a "terminal too small" message.
    /// - If terminal is tight (below `MIN_HEIGHT_WITH_HEADER`), hides the header to reclaim space.
    /// - Otherwise, renders normally with header.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            self.board_visible = false;
            let _ = self.state.drag.cancel();
            self.render_terminal_too_small(frame, area);
            return;
        }
        self.board_visible = true;

        let show_header = area.height >= MIN_HEIGHT_WITH_HEADER;
        self.header_visible = show_header;

        let content_area = if show_header {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
                .split(area);

            self.render_header(frame, chunks[0]);
            chunks[1]
        } else {
            area
        };

        let palette = self.state.palette();
        let buf = frame.buffer_mut();
        render_board(
            &BoardView::from_state(&self.state, &self.config),
            content_area,
            buf,
        );

        if let Some(modal) = &self.state.modal {
            render_modal(modal, &palette, area, buf);
        }

        if self.state.help_visible {
            render_help_overlay(&palette, area, buf);
        }
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(&self, frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: false });

        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Renders the header bar: title, sync and appearance status, help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let palette = self.state.palette();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.muted))
            .style(palette.base());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, status_area, help_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(24),
            Constraint::Length(17), // "Press ? for help" = 16 chars + padding
        ])
        .areas(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "corkboard",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" - ", Style::default().fg(palette.muted)),
            Span::styled("Kanban Board", Style::default().fg(palette.text)),
        ]));
        frame.render_widget(title, title_area);

        let mut status = Vec::new();
        let pending = self.dispatcher.pending();
        if pending > 0 {
            status.push(Span::styled(
                format!("⟳ {pending} · "),
                Style::default().fg(palette.accent),
            ));
        }
        status.push(Span::styled(
            format!("{} · {}", self.state.theme.name(), self.state.backdrop.label()),
            palette.hint(),
        ));
        frame.render_widget(
            Paragraph::new(Line::from(status)).alignment(Alignment::Right),
            status_area,
        );

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", palette.hint()),
            Span::styled("?", Style::default().fg(palette.accent)),
            Span::styled(" for help", palette.hint()),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    /// Runs the main application loop.
    ///
    /// Returns when the user quits. Store results are applied between
    /// frames; the loop never waits on the network.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use corkboard_client::TaskClient;
    /// use corkboard_config::Config;
    /// use corkboard_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let config = Config::default();
    ///     let client = TaskClient::new(&config.api_url, config.request_timeout())?;
    ///
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(config, Arc::new(client));
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        loop {
            self.drain_events();

            terminal.draw(|frame| self.view(frame))?;

            // Poll for events (keyboard and mouse)
            if let Some(event) = poll_event()? {
                let msg = match (&event, self.state.focus()) {
                    (Event::Key(key), Focus::Modal) => key_to_modal_message(*key),
                    _ => event_to_message(&event),
                };

                if let Some(msg) = msg {
                    self.update(msg);
                }
            }

            if self.should_quit {
                info!("quitting");
                break;
            }

            // Let spawned store calls make progress on a single-threaded runtime
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Waits for every store job to finish, then applies their events.
    #[cfg(test)]
    async fn settle(&mut self) {
        while self.dispatcher.pending() > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
        self.drain_events();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use corkboard_client::{MemoryStore, StoreCall};
    use corkboard_config::{Backdrop, Theme};
    use corkboard_protocol::{NewTask, Priority, Status, TaskPatch, TaskRecord};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn record(id: u64, title: &str, status: &str) -> TaskRecord {
        TaskRecord {
            id: TaskId::from(id),
            title: title.to_string(),
            description: "Login fails on mobile".to_string(),
            assigned_to: "Persona1".to_string(),
            end_date: "2024-01-01".to_string(),
            status: status.to_string(),
            priority: "High".to_string(),
        }
    }

    fn fix_bug_fields(status: Status) -> NewTask {
        NewTask {
            title: "Fix bug".to_string(),
            description: "Login fails on mobile".to_string(),
            assigned_to: "Persona1".to_string(),
            end_date: "2024-01-01".to_string(),
            status,
            priority: Priority::High,
        }
    }

    async fn app_with(records: Vec<TaskRecord>) -> (App, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_records(records));
        let mut app = App::new(Config::default(), store.clone());
        app.settle().await;
        (app, store)
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    /// Selects the first card of the To Do column.
    fn select_first_todo(app: &mut App) {
        app.update(Message::NavigateRight);
        app.update(Message::NavigateDown);
        assert_eq!(app.state.selected_status(), Status::Todo);
    }

    #[tokio::test]
    async fn app_new_loads_the_board() {
        let (app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;

        assert!(!app.should_quit);
        assert_eq!(app.state.board.lane(Status::Todo).len(), 1);
        assert_eq!(store.calls(), vec![StoreCall::List]);
    }

    #[tokio::test]
    async fn app_new_applies_configured_appearance() {
        let config = Config {
            theme: Theme::Dark,
            backdrop: Backdrop::Cork,
            ..Config::default()
        };
        let app = App::new(config, Arc::new(MemoryStore::new()));

        assert_eq!(app.state.theme, Theme::Dark);
        assert_eq!(app.state.backdrop, Backdrop::Cork);
    }

    #[tokio::test]
    async fn app_quit_message_sets_should_quit() {
        let (mut app, _) = app_with(vec![]).await;

        app.update(Message::Quit);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn app_navigation_wraps_over_five_columns() {
        let (mut app, _) = app_with(vec![]).await;

        app.update(Message::NavigateLeft);
        assert_eq!(app.state.selected_status(), Status::Done);

        app.update(Message::NavigateRight);
        assert_eq!(app.state.selected_status(), Status::Backlog);
    }

    #[tokio::test]
    async fn app_help_dismisses_on_any_key() {
        let (mut app, _) = app_with(vec![]).await;

        app.update(Message::ToggleHelp);
        assert!(app.state.help_visible);

        app.update(Message::NavigateRight);
        assert!(!app.state.help_visible);
        // Navigation was swallowed
        assert_eq!(app.state.selected_lane, 0);
    }

    #[tokio::test]
    async fn app_quit_works_with_help_visible() {
        let (mut app, _) = app_with(vec![]).await;

        app.update(Message::ToggleHelp);
        app.update(Message::Quit);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn app_theme_and_backdrop_toggle() {
        let (mut app, store) = app_with(vec![]).await;

        app.update(Message::ToggleTheme);
        app.update(Message::CycleBackdrop);
        assert_eq!(app.state.theme, Theme::Dark);
        assert_eq!(app.state.backdrop, Backdrop::Cork);

        app.update(Message::ToggleTheme);
        app.update(Message::CycleBackdrop);
        assert_eq!(app.state.theme, Theme::Light);
        assert_eq!(app.state.backdrop, Backdrop::Default);
        assert!(store.mutations().is_empty());
    }

    #[tokio::test]
    async fn keyboard_drag_to_done_sends_one_full_update() {
        let (mut app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        select_first_todo(&mut app);

        app.update(Message::BeginDrag);
        assert_eq!(app.state.focus(), Focus::Drag);
        app.update(Message::NavigateRight);
        app.update(Message::NavigateRight);
        app.update(Message::NavigateRight);
        assert_eq!(app.state.drag.target(), Some(Status::Done));

        app.update(Message::Select);
        // Moved before the server answers
        assert_eq!(app.state.board.placement(&TaskId::from(1)), Some(Status::Done));

        app.settle().await;
        assert_eq!(
            store.mutations(),
            vec![StoreCall::Update(
                TaskId::from(1),
                TaskPatch::from(fix_bug_fields(Status::Done)),
            )]
        );
        assert_eq!(app.state.board.placement(&TaskId::from(1)), Some(Status::Done));
        assert_eq!(store.records()[0].status, "done");
    }

    #[tokio::test]
    async fn keyboard_drag_escape_sends_nothing() {
        let (mut app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        select_first_todo(&mut app);

        app.update(Message::BeginDrag);
        app.update(Message::NavigateRight);
        app.update(Message::Escape);

        assert_eq!(app.state.focus(), Focus::Board);
        app.settle().await;
        assert!(store.mutations().is_empty());
        assert_eq!(app.state.board.placement(&TaskId::from(1)), Some(Status::Todo));
    }

    #[tokio::test]
    async fn pointer_drag_across_columns_moves_the_card() {
        let (mut app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        // 100 columns: each lane is 20 wide; the header takes rows 0-2.
        draw(&mut app, 100, 30);

        app.update(Message::ClickAt { column: 25, row: 5 });
        app.update(Message::DragAt { column: 50, row: 10 });
        assert_eq!(app.state.drag.target(), Some(Status::InProgress));
        app.update(Message::DragAt { column: 85, row: 10 });
        app.update(Message::ReleaseAt { column: 85, row: 10 });

        app.settle().await;
        assert_eq!(
            store.mutations(),
            vec![StoreCall::Update(
                TaskId::from(1),
                TaskPatch::from(fix_bug_fields(Status::Done)),
            )]
        );
        assert!(app.state.modal.is_none());
    }

    #[tokio::test]
    async fn pointer_drop_outside_board_aborts() {
        let (mut app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        draw(&mut app, 100, 30);

        app.update(Message::ClickAt { column: 25, row: 5 });
        app.update(Message::DragAt { column: 25, row: 1 });
        app.update(Message::ReleaseAt { column: 25, row: 1 });

        app.settle().await;
        assert!(store.mutations().is_empty());
        assert_eq!(app.state.drag, DragState::Idle);
        assert_eq!(app.state.board.placement(&TaskId::from(1)), Some(Status::Todo));
    }

    #[tokio::test]
    async fn pointer_input_is_ignored_while_board_is_hidden() {
        let (mut app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        let content = draw(&mut app, 80, MIN_HEIGHT - 1);
        assert!(content.contains("Terminal too small"));

        app.update(Message::ClickAt { column: 20, row: 2 });
        app.update(Message::DragAt { column: 70, row: 2 });
        app.update(Message::ReleaseAt { column: 70, row: 2 });
        app.update(Message::NavigateRight);
        app.update(Message::BeginDrag);
        app.update(Message::Select);

        app.settle().await;
        assert!(store.mutations().is_empty());
        assert!(app.state.modal.is_none());
        assert_eq!(app.state.drag, DragState::Idle);
        assert_eq!(app.state.board.placement(&TaskId::from(1)), Some(Status::Todo));
    }

    #[tokio::test]
    async fn shrinking_the_terminal_cancels_a_drag() {
        let (mut app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        draw(&mut app, 100, 30);
        app.update(Message::ClickAt { column: 25, row: 5 });
        app.update(Message::DragAt { column: 85, row: 10 });
        assert!(app.state.drag.is_dragging());

        draw(&mut app, 80, MIN_HEIGHT - 1);
        assert_eq!(app.state.drag, DragState::Idle);

        draw(&mut app, 100, 30);
        app.update(Message::ReleaseAt { column: 85, row: 10 });
        app.settle().await;
        assert!(store.mutations().is_empty());
        assert_eq!(app.state.board.placement(&TaskId::from(1)), Some(Status::Todo));
    }

    #[tokio::test]
    async fn click_on_card_opens_edit_modal() {
        let (mut app, _) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        draw(&mut app, 100, 30);

        app.update(Message::ClickAt { column: 25, row: 5 });
        app.update(Message::ReleaseAt { column: 25, row: 5 });

        let modal = app.state.modal.as_ref().expect("modal open");
        assert_eq!(modal.current_id(), Some(&TaskId::from(1)));
        assert_eq!(modal.form().title, "Fix bug");
    }

    #[tokio::test]
    async fn click_on_empty_column_does_nothing() {
        let (mut app, _) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        draw(&mut app, 100, 30);

        app.update(Message::ClickAt { column: 5, row: 5 });
        app.update(Message::ReleaseAt { column: 5, row: 5 });

        assert!(app.state.modal.is_none());
        assert_eq!(app.state.selected_task, None);
    }

    #[tokio::test]
    async fn click_works_in_compact_mode() {
        let (mut app, _) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        // Below MIN_HEIGHT_WITH_HEADER the board starts at row 0.
        draw(&mut app, 100, MIN_HEIGHT);
        assert!(!app.header_visible);

        app.update(Message::ClickAt { column: 25, row: 2 });
        app.update(Message::ReleaseAt { column: 25, row: 2 });

        assert!(app.state.modal.is_some());
    }

    #[tokio::test]
    async fn editing_one_field_sends_every_field() {
        let (mut app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        select_first_todo(&mut app);

        app.update(Message::Select);
        assert_eq!(app.state.focus(), Focus::Modal);
        app.update(Message::ModalInput { ch: '!' });
        app.update(Message::ModalSave);
        assert!(app.state.modal.is_none());

        app.settle().await;
        let mut expected = fix_bug_fields(Status::Todo);
        expected.title = "Fix bug!".to_string();
        assert_eq!(
            store.mutations(),
            vec![StoreCall::Update(TaskId::from(1), TaskPatch::from(expected))]
        );
        assert_eq!(
            app.state.board.record(&TaskId::from(1)).map(|t| t.title.as_str()),
            Some("Fix bug!")
        );
    }

    #[tokio::test]
    async fn cancelling_the_modal_sends_nothing() {
        let (mut app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        select_first_todo(&mut app);

        app.update(Message::Select);
        app.update(Message::ModalInput { ch: 'x' });
        app.update(Message::ModalCancel);

        assert!(app.state.modal.is_none());
        app.settle().await;
        assert!(store.mutations().is_empty());
    }

    #[tokio::test]
    async fn create_modal_posts_new_task() {
        let (mut app, store) = app_with(vec![]).await;

        app.update(Message::OpenCreate);
        for ch in "Write docs".chars() {
            app.update(Message::ModalInput { ch });
        }
        app.update(Message::ModalSave);

        app.settle().await;
        let expected = NewTask {
            title: "Write docs".to_string(),
            assigned_to: "Persona1".to_string(),
            ..NewTask::default()
        };
        assert_eq!(store.mutations(), vec![StoreCall::Create(expected)]);
        assert_eq!(app.state.board.lane(Status::Backlog).len(), 1);
    }

    #[tokio::test]
    async fn delete_from_edit_modal_removes_task() {
        let (mut app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        select_first_todo(&mut app);

        app.update(Message::Select);
        app.update(Message::ModalDelete);
        assert!(app.state.modal.is_none());

        app.settle().await;
        assert_eq!(store.mutations(), vec![StoreCall::Delete(TaskId::from(1))]);
        assert!(app.state.board.is_empty());
    }

    #[tokio::test]
    async fn delete_in_create_mode_keeps_modal_open() {
        let (mut app, store) = app_with(vec![]).await;

        app.update(Message::OpenCreate);
        app.update(Message::ModalDelete);

        assert!(app.state.modal.is_some());
        app.settle().await;
        assert!(store.mutations().is_empty());
    }

    #[tokio::test]
    async fn stale_refresh_does_not_replace_newer_board() {
        let store = Arc::new(MemoryStore::with_records(vec![record(1, "Fix bug", "todo")]));
        // The initial list answers last.
        store.delay_next(Duration::from_millis(50));
        let mut app = App::new(Config::default(), store.clone());
        app.update(Message::Refresh);

        app.settle().await;
        assert_eq!(app.state.last_ticket(), 2);
        assert_eq!(app.state.board.total_cards(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_board() {
        let (mut app, store) = app_with(vec![record(1, "Fix bug", "todo")]).await;

        store.set_failing(true);
        app.update(Message::Refresh);
        app.settle().await;

        assert_eq!(app.state.board.total_cards(), 1);
        assert_eq!(app.state.last_ticket(), 1);
    }

    #[tokio::test]
    async fn unknown_status_never_reaches_the_board() {
        let (app, _) = app_with(vec![
            record(1, "Fix bug", "todo"),
            record(2, "Odd", "archived"),
        ])
        .await;

        assert_eq!(app.state.board.total_cards(), 1);
        assert!(app.state.board.record(&TaskId::from(2)).is_none());
    }

    // --- Rendering ---

    #[tokio::test]
    async fn app_view_shows_too_small_message_when_height_below_minimum() {
        let (mut app, _) = app_with(vec![]).await;

        let content = draw(&mut app, 80, MIN_HEIGHT - 1);

        assert!(!app.header_visible);
        assert!(content.contains("Terminal too small"));
    }

    #[tokio::test]
    async fn app_view_shows_too_small_message_when_width_below_minimum() {
        let (mut app, _) = app_with(vec![]).await;

        let content = draw(&mut app, MIN_WIDTH - 1, 24);

        assert!(!app.header_visible);
        assert!(content.contains("Terminal too small"));
    }

    #[tokio::test]
    async fn app_view_hides_header_in_compact_mode() {
        let (mut app, _) = app_with(vec![]).await;

        let content = draw(&mut app, 80, MIN_HEIGHT_WITH_HEADER - 1);

        assert!(!app.header_visible);
        assert!(content.contains("Backlog"));
        assert!(!content.contains("corkboard"));
    }

    #[tokio::test]
    async fn app_view_shows_header_when_terminal_large_enough() {
        let (mut app, _) = app_with(vec![record(1, "Fix bug", "todo")]).await;

        let content = draw(&mut app, 100, 30);

        assert!(app.header_visible);
        assert!(content.contains("corkboard"));
        assert!(content.contains("light · Default"));
        assert!(content.contains("Press ? for help"));
        assert!(content.contains("To Do (1)"));
        assert!(content.contains("Fix bug"));
    }

    #[tokio::test]
    async fn app_view_draws_modal_and_help_overlays() {
        let (mut app, _) = app_with(vec![record(1, "Fix bug", "todo")]).await;
        select_first_todo(&mut app);

        app.update(Message::Select);
        let content = draw(&mut app, 100, 30);
        assert!(content.contains("Edit task 1"));

        app.update(Message::ModalCancel);
        app.update(Message::ToggleHelp);
        let content = draw(&mut app, 100, 30);
        assert!(content.contains("Press any key to close"));
    }
}
