//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application state to update the UI.
///
/// # Examples
///
/// ```
/// use corkboard_protocol::Message;
///
/// let msg = Message::NavigateRight;
/// assert!(matches!(msg, Message::NavigateRight));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move focus to the left column, or the drag target during a keyboard drag.
    NavigateLeft,
    /// Move focus to the right column, or the drag target during a keyboard drag.
    NavigateRight,
    /// Move selection up within the current column.
    NavigateUp,
    /// Move selection down within the current column.
    NavigateDown,
    /// Open the selected card, or drop during a keyboard drag.
    Select,
    /// Close the help overlay, abort a drag, or clear the selection.
    Escape,
    /// Quit the application.
    Quit,
    /// Re-fetch the task list.
    Refresh,
    /// Toggle help overlay.
    ToggleHelp,
    /// Switch between the light and dark palette.
    ToggleTheme,
    /// Cycle the board backdrop.
    CycleBackdrop,
    /// Open the modal in create mode.
    OpenCreate,
    /// Start a keyboard drag of the selected card.
    BeginDrag,
    /// Mouse click at coordinates (column, row).
    ClickAt {
        /// Column (x coordinate) of the click.
        column: u16,
        /// Row (y coordinate) of the click.
        row: u16,
    },
    /// Mouse moved with the left button held.
    DragAt {
        /// Column (x coordinate) of the pointer.
        column: u16,
        /// Row (y coordinate) of the pointer.
        row: u16,
    },
    /// Left button released.
    ReleaseAt {
        /// Column (x coordinate) of the release.
        column: u16,
        /// Row (y coordinate) of the release.
        row: u16,
    },

    // --- Modal messages ---
    /// Type a character into the focused text field.
    ModalInput {
        /// The character that was typed.
        ch: char,
    },
    /// Delete the last character of the focused text field.
    ModalBackspace,
    /// Focus the next form field.
    ModalNextField,
    /// Focus the previous form field.
    ModalPrevField,
    /// Cycle the value of the focused choice field.
    ModalCycle {
        /// Direction to cycle (positive = forward, negative = backward).
        delta: i32,
    },
    /// Save the form (create or update) and close.
    ModalSave,
    /// Delete the edited task and close.
    ModalDelete,
    /// Close without saving.
    ModalCancel,
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(Message::ModalNextField.is_navigation());
    /// assert!(!Message::Select.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft
                | Self::NavigateRight
                | Self::NavigateUp
                | Self::NavigateDown
                | Self::ModalNextField
                | Self::ModalPrevField
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message only makes sense while the modal is open.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::Message;
    ///
    /// assert!(Message::ModalSave.is_modal());
    /// assert!(Message::ModalInput { ch: 'x' }.is_modal());
    /// assert!(!Message::OpenCreate.is_modal());
    /// ```
    #[must_use]
    pub fn is_modal(&self) -> bool {
        matches!(
            self,
            Self::ModalInput { .. }
                | Self::ModalBackspace
                | Self::ModalNextField
                | Self::ModalPrevField
                | Self::ModalCycle { .. }
                | Self::ModalSave
                | Self::ModalDelete
                | Self::ModalCancel
        )
    }

    /// Returns `true` if this message may start a network call.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::ModalSave | Self::ModalDelete | Self::ReleaseAt { .. } | Self::Refresh
        )
    }
}
