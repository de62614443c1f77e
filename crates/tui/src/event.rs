//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages.

use std::time::Duration;

use corkboard_protocol::Message;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to an application message.
///
/// Returns `Some(Message)` if the event maps to an action,
/// or `None` if the event is not handled.
#[must_use]
pub fn event_to_message(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) => key_to_message(*key),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a mouse event to an application message.
///
/// Only the left button is handled: press, drag and release map to
/// `ClickAt`, `DragAt` and `ReleaseAt`.
#[must_use]
pub fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::ClickAt { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Message::DragAt { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Message::ReleaseAt { column, row }),
        _ => None,
    }
}

fn is_ctrl(key: &KeyEvent, ch: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(ch)
}

/// Converts a terminal key event to an application message.
///
/// Returns `Some(Message)` if the key event maps to an action,
/// or `None` if the key is not bound.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Escape (dismiss help, abort drag, or clear selection) |
/// | `Left` | Navigate left |
/// | `Right` | Navigate right |
/// | `Up` | Navigate up |
/// | `Down` | Navigate down |
/// | `Enter` or `Space` | Select (open card, or drop during a drag) |
/// | `a` | New task |
/// | `m` | Move the selected card |
/// | `t` | Toggle light/dark theme |
/// | `b` | Cycle backdrop |
/// | `r` | Refresh |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl(&key, 'c') {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        // Navigation (arrow keys only)
        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),

        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Select),

        KeyCode::Char('a') => Some(Message::OpenCreate),
        KeyCode::Char('m') => Some(Message::BeginDrag),
        KeyCode::Char('t') => Some(Message::ToggleTheme),
        KeyCode::Char('b') => Some(Message::CycleBackdrop),
        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

/// Converts a key event to a modal form message.
///
/// Used while the task modal is open, where printable keys are text input.
///
/// # Key Bindings (Modal)
///
/// | Key | Action |
/// |-----|--------|
/// | Any char | Type into the focused text field |
/// | `Backspace` | Delete the last character |
/// | `Tab` / `Shift+Tab` | Next / previous field |
/// | `Left` / `Right` | Cycle assignee, priority or status |
/// | `Enter` | Save and close |
/// | `Ctrl+D` | Delete the task and close (edit mode only) |
/// | `Esc` | Close without saving |
#[must_use]
pub fn key_to_modal_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl(&key, 'c') {
        return Some(Message::Quit);
    }
    if is_ctrl(&key, 'd') {
        return Some(Message::ModalDelete);
    }

    match key.code {
        KeyCode::Esc => Some(Message::ModalCancel),
        KeyCode::Enter => Some(Message::ModalSave),
        KeyCode::Tab => Some(Message::ModalNextField),
        KeyCode::BackTab => Some(Message::ModalPrevField),
        KeyCode::Left => Some(Message::ModalCycle { delta: -1 }),
        KeyCode::Right => Some(Message::ModalCycle { delta: 1 }),
        KeyCode::Backspace => Some(Message::ModalBackspace),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Message::ModalInput { ch })
        }
        _ => None,
    }
}
