//! Drag-and-drop controller.
//!
//! A gesture moves through `Idle → Pressed → Dragging → dropped` for the
//! mouse, or `Idle → Dragging → dropped` when started from the keyboard with
//! `m`. Dropping moves the card on the board right away and yields the one
//! update request that makes the move permanent.
//!
//! The request body is built from the retained record, never from what is
//! drawn on screen, so a drop carries every field exactly as the server last
//! reported it, with only the status replaced.

use corkboard_protocol::{KanbanBoard, Status, TaskId, TaskPatch};
use tracing::{debug, info, warn};

/// How a drag was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// Left button held on a card and moved.
    Pointer,
    /// `m` on the selected card; arrows pick the target, Enter drops.
    Keyboard,
}

/// The drag gesture in progress, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture.
    #[default]
    Idle,
    /// The left button went down on a card but has not moved yet.
    ///
    /// Releasing in this state is a click.
    Pressed {
        /// The card under the pointer.
        id: TaskId,
    },
    /// A card is being carried.
    Dragging {
        /// The payload.
        id: TaskId,
        /// The column the card was picked up from.
        origin: Status,
        /// The column under the pointer, or the keyboard target.
        target: Option<Status>,
        /// How the gesture was started.
        source: DragSource,
    },
}

/// A completed drop: the request to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropRequest {
    /// The moved task.
    pub id: TaskId,
    /// Every field of the retained record, with the target status.
    pub patch: TaskPatch,
}

/// Why a gesture ended without a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragAbort {
    /// There was nothing to drop.
    #[error("no drag in progress")]
    NotDragging,

    /// The card was released outside every column.
    #[error("task {0} dropped outside the board")]
    OutsideColumns(TaskId),

    /// The card left the board while it was being carried.
    #[error("task {0} is no longer on the board")]
    Vanished(TaskId),

    /// The user cancelled.
    #[error("drag of task {0} cancelled")]
    Cancelled(TaskId),
}

impl DragState {
    /// Returns `true` while a card is being carried.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Returns `true` while a keyboard drag is in progress.
    #[must_use]
    pub fn is_keyboard_drag(&self) -> bool {
        matches!(
            self,
            Self::Dragging {
                source: DragSource::Keyboard,
                ..
            }
        )
    }

    /// Returns the carried task id.
    #[must_use]
    pub fn payload(&self) -> Option<&TaskId> {
        match self {
            Self::Dragging { id, .. } => Some(id),
            Self::Idle | Self::Pressed { .. } => None,
        }
    }

    /// Returns the column currently targeted.
    #[must_use]
    pub fn target(&self) -> Option<Status> {
        match self {
            Self::Dragging { target, .. } => *target,
            Self::Idle | Self::Pressed { .. } => None,
        }
    }

    /// Records a button press on a card.
    pub fn press(&mut self, id: TaskId) {
        *self = Self::Pressed { id };
    }

    /// Starts carrying a card.
    ///
    /// A keyboard drag targets its own column until moved.
    pub fn begin(&mut self, id: TaskId, origin: Status, source: DragSource) {
        debug!(%id, %origin, ?source, "drag started");
        let target = match source {
            DragSource::Keyboard => Some(origin),
            DragSource::Pointer => None,
        };
        *self = Self::Dragging {
            id,
            origin,
            target,
            source,
        };
    }

    /// Handles pointer motion with the button held.
    ///
    /// A pressed card becomes a pointer drag from `origin`; an active drag
    /// retargets to `over`.
    pub fn pointer_moved(&mut self, origin: Option<Status>, over: Option<Status>) {
        match self {
            Self::Pressed { id } => {
                let Some(origin) = origin else {
                    *self = Self::Idle;
                    return;
                };
                let id = id.clone();
                self.begin(id, origin, DragSource::Pointer);
                self.hover(over);
            }
            Self::Dragging { .. } => self.hover(over),
            Self::Idle => {}
        }
    }

    /// Sets the target column.
    pub fn hover(&mut self, over: Option<Status>) {
        if let Self::Dragging { target, .. } = self {
            *target = over;
        }
    }

    /// Moves the keyboard target one column left or right, wrapping.
    pub fn shift_target(&mut self, forward: bool) {
        if let Self::Dragging {
            target, origin, ..
        } = self
        {
            let current = target.unwrap_or(*origin);
            *target = Some(if forward {
                current.cycle_next()
            } else {
                current.cycle_prev()
            });
        }
    }

    /// Takes a pending click, leaving the state idle.
    ///
    /// Returns the pressed card if the button went up without moving.
    pub fn take_click(&mut self) -> Option<TaskId> {
        match std::mem::take(self) {
            Self::Pressed { id } => Some(id),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Abandons the gesture.
    ///
    /// Returns `true` if a card was being carried.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(self) {
            Self::Dragging { id, .. } => {
                info!(reason = %DragAbort::Cancelled(id), "drag aborted");
                true
            }
            Self::Idle | Self::Pressed { .. } => false,
        }
    }

    /// Drops the carried card on the current target.
    ///
    /// On success the card is already in the target column and the returned
    /// [`DropRequest`] holds the single update to send. The state is idle afterwards
    /// whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`DragAbort`] if nothing was carried, the target is outside
    /// every column, or the card is gone from the board. No request must be
    /// sent in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::{KanbanBoard, Priority, Status, Task, TaskId};
    /// use corkboard_tui::drag::{DragSource, DragState};
    ///
    /// let mut board = KanbanBoard::new();
    /// board.rebuild([Task {
    ///     id: TaskId::from(1),
    ///     title: "Fix bug".into(),
    ///     description: String::new(),
    ///     assigned_to: "Persona1".into(),
    ///     priority: Priority::High,
    ///     status: Status::Todo,
    ///     end_date: "2024-01-01".into(),
    /// }]);
    ///
    /// let mut drag = DragState::default();
    /// drag.begin(TaskId::from(1), Status::Todo, DragSource::Pointer);
    /// drag.hover(Some(Status::Done));
    ///
    /// let drop = drag.drop_card(&mut board).unwrap();
    /// assert_eq!(drop.patch.status, Some(Status::Done));
    /// assert_eq!(drop.patch.title.as_deref(), Some("Fix bug"));
    /// assert_eq!(board.placement(&TaskId::from(1)), Some(Status::Done));
    /// ```
    pub fn drop_card(&mut self, board: &mut KanbanBoard) -> Result<DropRequest, DragAbort> {
        let Self::Dragging { id, target, .. } = std::mem::take(self) else {
            return Err(DragAbort::NotDragging);
        };

        let Some(target) = target else {
            let abort = DragAbort::OutsideColumns(id);
            warn!(reason = %abort, "drag aborted");
            return Err(abort);
        };

        let Some(record) = board.record(&id) else {
            let abort = DragAbort::Vanished(id);
            warn!(reason = %abort, "drag aborted");
            return Err(abort);
        };
        let patch = TaskPatch::from(record.fields()).with_status(target);

        if !board.move_card(&id, target) {
            let abort = DragAbort::Vanished(id);
            warn!(reason = %abort, "drag aborted");
            return Err(abort);
        }

        info!(%id, %target, "task dropped");
        Ok(DropRequest { id, patch })
    }
}
