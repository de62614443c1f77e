//! Snapshot tests for widget rendering.
//!
//! These tests use insta to capture and verify the visual output of widgets.

use corkboard_config::{Config, Person};
use corkboard_protocol::{KanbanBoard, Priority, Status, Task, TaskId};
use ratatui::{buffer::Buffer, layout::Rect};

use super::{
    BoardView, card_at, help::HELP_HEIGHT, help::HELP_WIDTH, lane_areas, modal::MODAL_HEIGHT,
    modal::MODAL_WIDTH, render_board, render_help_overlay, render_modal, render_task_card,
};
use crate::modal::ModalState;
use crate::test_utils::{buffer_to_string, region_to_string, render_to_string};
use crate::theme::Palette;

fn task(id: u64, title: &str, status: Status, priority: Priority) -> Task {
    Task {
        id: TaskId::from(id),
        title: title.to_string(),
        description: String::new(),
        assigned_to: "Persona1".to_string(),
        priority,
        status,
        end_date: String::new(),
    }
}

/// Creates a sample board with tasks spread over the columns.
fn create_sample_board() -> KanbanBoard {
    let mut design = task(1, "Design UI mockups", Status::Backlog, Priority::Low);
    design.description = "Create wireframes".to_string();
    design.assigned_to = "Persona2".to_string();

    let mut parser = task(3, "Implement parser", Status::InProgress, Priority::High);
    parser.end_date = "2024-05-01".to_string();

    let mut board = KanbanBoard::new();
    board.rebuild(vec![
        design,
        task(2, "Write specs", Status::Backlog, Priority::Medium),
        parser,
        task(4, "Waiting on API", Status::Blocked, Priority::Medium),
        task(5, "Setup CI", Status::Done, Priority::Low),
    ]);
    board
}

#[test]
fn snapshot_task_card() {
    let mut fix = task(1, "Fix bug", Status::Todo, Priority::High);
    fix.end_date = "2024-01-01".to_string();

    let card = render_to_string(24, 5, |area, buf| {
        render_task_card(&fix, "◆", false, &Palette::default(), area, buf);
    });

    insta::assert_snapshot!(card, @r"
┌──────────────────────┐
│Fix bug               │
│                      │
│◆ Persona1 · High ·...│
└──────────────────────┘
");
}

#[test]
fn snapshot_help_overlay() {
    let help = render_to_string(HELP_WIDTH, HELP_HEIGHT, |area, buf| {
        render_help_overlay(&Palette::default(), area, buf);
    });

    insta::assert_snapshot!(help, @r"
╭ Help ────────────────────────────╮
│                                  │
│  Navigation                      │
│  ←          Move left            │
│  →          Move right           │
│  ↑          Select previous      │
│  ↓          Select next          │
│                                  │
│  Tasks                           │
│  Enter      Edit task            │
│  a          New task             │
│  m          Move task            │
│  Mouse      Click to edit, drag  │
│                                  │
│  Board                           │
│  t          Toggle theme         │
│  b          Cycle backdrop       │
│  r          Refresh              │
│  Esc        Cancel               │
│  Ctrl+C     Quit                 │
│  ?          Toggle help          │
│                                  │
│  Press any key to close          │
╰──────────────────────────────────╯
");
}

#[test]
fn snapshot_edit_modal() {
    let mut fix = task(1, "Fix bug", Status::Todo, Priority::High);
    fix.description = "Login fails on mobile".to_string();
    fix.end_date = "2024-01-01".to_string();
    let modal = ModalState::edit(&fix, Status::Todo);

    let form = render_to_string(MODAL_WIDTH, MODAL_HEIGHT, |area, buf| {
        render_modal(&modal, &Palette::default(), area, buf);
    });

    insta::assert_snapshot!(form, @r"
╭ Edit task 1 ─────────────────────────────────────────╮
│                                                      │
│ ▸ Title       Fix bug_                               │
│   Description Login fails on mobile                  │
│   Assignee    Persona1                               │
│   Priority    High                                   │
│   Status      To Do                                  │
│   Deadline    2024-01-01                             │
│                                                      │
│ Enter save · Esc cancel · Tab next · Ctrl+D delete   │
╰──────────────────────────────────────────────────────╯
");
}

#[test]
fn board_shows_every_card_in_its_column() {
    let board = create_sample_board();
    let config = Config::default();
    let area = Rect::new(0, 0, 100, 24);
    let mut buf = Buffer::empty(area);

    render_board(&BoardView::new(&board, &config), area, &mut buf);

    let content = buffer_to_string(&buf);
    assert!(content.contains("Backlog (2)"));
    assert!(content.contains("To Do (0)"));
    assert!(content.contains("In Progress (1)"));
    assert!(content.contains("Blocked (1)"));
    assert!(content.contains("Done (1)"));
    assert!(content.contains("▲ Persona2"));
    assert!(content.contains("Setup CI"));
}

#[test]
fn each_lane_region_holds_only_its_own_cards() {
    let board = create_sample_board();
    let config = Config::default();
    let area = Rect::new(0, 0, 100, 24);
    let mut buf = Buffer::empty(area);
    render_board(&BoardView::new(&board, &config), area, &mut buf);

    let lanes = lane_areas(area);
    let backlog = region_to_string(&buf, lanes[Status::Backlog.index()]);
    let done = region_to_string(&buf, lanes[Status::Done.index()]);

    assert!(backlog.contains("Design UI mockups"));
    assert!(backlog.contains("Write specs"));
    assert!(!backlog.contains("Setup CI"));
    assert!(done.contains("Setup CI"));
    assert!(!done.contains("Write specs"));
}

#[test]
fn board_hit_testing_matches_rendering() {
    let board = create_sample_board();
    let config = Config::default();
    let view = BoardView::new(&board, &config);
    let area = Rect::new(0, 3, 100, 21);
    let mut buf = Buffer::empty(area);
    render_board(&view, area, &mut buf);

    // Every row that shows a card title maps back to that card.
    for (status, index) in [
        (Status::Backlog, 0),
        (Status::Backlog, 1),
        (Status::InProgress, 0),
        (Status::Blocked, 0),
        (Status::Done, 0),
    ] {
        let title = &board
            .task_at(status, index)
            .expect("card exists")
            .title;
        let first_char = title.chars().next().expect("title is not empty");
        let hit = (area.top()..area.bottom()).find_map(|row| {
            (area.left()..area.right()).find_map(|col| {
                let symbol = buf.cell((col, row))?.symbol().to_string();
                let rest: String = (col..col + title.len() as u16)
                    .filter_map(|x| buf.cell((x, row)).map(|c| c.symbol().to_string()))
                    .collect();
                (symbol.starts_with(first_char) && rest == *title).then_some((col, row))
            })
        });
        let (col, row) = hit.expect("title rendered");
        assert_eq!(card_at(&view, area, col, row), Some((status, index)));
    }
}

#[test]
fn create_modal_lists_first_person() {
    let modal = ModalState::create(&Person::defaults());
    let content = render_to_string(80, 24, |area, buf| {
        render_modal(&modal, &Palette::default(), area, buf);
    });

    assert!(content.contains("New task"));
    assert!(content.contains("Persona1"));
    assert!(content.contains("Low"));
}
