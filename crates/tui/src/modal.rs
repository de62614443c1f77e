//! Task edit modal state.
//!
//! One form serves both creating and editing. Which of the two it does is
//! decided only by whether a task id is tracked: `None` creates, `Some`
//! updates. Closing the modal drops the whole [`ModalState`], so the tracked
//! id and the field values never outlive it.
//!
//! The form does no validation. Whatever is typed is sent as-is.

use corkboard_config::Person;
use corkboard_protocol::{NewTask, Priority, Status, Task, TaskId, TaskPatch};

/// A form field, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Field {
    /// Free text.
    #[default]
    Title,
    /// Free text.
    Description,
    /// Cycles through the configured people.
    Assignee,
    /// Cycles Low, Medium, High.
    Priority,
    /// Cycles through the five columns.
    Status,
    /// Free text, never parsed.
    Deadline,
}

impl Field {
    /// Returns all fields in tab order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Title,
            Self::Description,
            Self::Assignee,
            Self::Priority,
            Self::Status,
            Self::Deadline,
        ]
    }

    /// Returns the label shown in front of the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Assignee => "Assignee",
            Self::Priority => "Priority",
            Self::Status => "Status",
            Self::Deadline => "Deadline",
        }
    }

    /// Returns `true` for fields edited by typing.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Title | Self::Description | Self::Deadline)
    }

    const fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Description => 1,
            Self::Assignee => 2,
            Self::Priority => 3,
            Self::Status => 4,
            Self::Deadline => 5,
        }
    }

    /// Returns the next field, wrapping to the first.
    #[must_use]
    pub const fn next(self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Returns the previous field, wrapping to the last.
    #[must_use]
    pub const fn prev(self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// What the modal is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    /// No tracked id; saving creates a task.
    Create,
    /// Saving updates, and deleting removes, this task.
    Edit(TaskId),
}

/// The store call a closed modal asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// `create(fields)`
    Create(NewTask),
    /// `update(id, patch)` with every field present.
    Update(TaskId, TaskPatch),
    /// `delete(id)`
    Delete(TaskId),
}

/// An open modal.
///
/// # Examples
///
/// ```
/// use corkboard_config::Person;
/// use corkboard_protocol::Status;
/// use corkboard_tui::modal::{ModalAction, ModalState};
///
/// let people = Person::defaults();
/// let mut modal = ModalState::create(&people);
/// for ch in "Write docs".chars() {
///     modal.input(ch);
/// }
///
/// let ModalAction::Create(fields) = modal.save() else { unreachable!() };
/// assert_eq!(fields.title, "Write docs");
/// assert_eq!(fields.status, Status::Backlog);
/// assert_eq!(fields.assigned_to, "Persona1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    mode: ModalMode,
    form: NewTask,
    focus: Field,
}

impl ModalState {
    /// Opens a blank form for a new task.
    ///
    /// Status starts at backlog, priority at Low, and the assignee at the
    /// first configured person.
    #[must_use]
    pub fn create(people: &[Person]) -> Self {
        let form = NewTask {
            assigned_to: people
                .first()
                .map(|person| person.name().to_string())
                .unwrap_or_default(),
            status: Status::Backlog,
            priority: Priority::Low,
            ..NewTask::default()
        };
        Self {
            mode: ModalMode::Create,
            form,
            focus: Field::default(),
        }
    }

    /// Opens the form pre-filled from a retained record.
    ///
    /// `placement` is the column currently holding the card; it wins over
    /// the record's status, which may lag behind an optimistic drop.
    #[must_use]
    pub fn edit(task: &Task, placement: Status) -> Self {
        let mut form = task.fields();
        form.status = placement;
        Self {
            mode: ModalMode::Edit(task.id.clone()),
            form,
            focus: Field::default(),
        }
    }

    /// Returns the binding.
    #[must_use]
    pub fn mode(&self) -> &ModalMode {
        &self.mode
    }

    /// Returns the tracked task id, if editing.
    #[must_use]
    pub fn current_id(&self) -> Option<&TaskId> {
        match &self.mode {
            ModalMode::Create => None,
            ModalMode::Edit(id) => Some(id),
        }
    }

    /// Returns the field values.
    #[must_use]
    pub fn form(&self) -> &NewTask {
        &self.form
    }

    /// Returns the focused field.
    #[must_use]
    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Returns the text of a field as displayed.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.form.title,
            Field::Description => &self.form.description,
            Field::Assignee => &self.form.assigned_to,
            Field::Priority => self.form.priority.label(),
            Field::Status => self.form.status.display_name(),
            Field::Deadline => &self.form.end_date,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Title => Some(&mut self.form.title),
            Field::Description => Some(&mut self.form.description),
            Field::Deadline => Some(&mut self.form.end_date),
            Field::Assignee | Field::Priority | Field::Status => None,
        }
    }

    /// Appends a character to the focused text field.
    pub fn input(&mut self, ch: char) {
        if let Some(text) = self.text_mut() {
            text.push(ch);
        }
    }

    /// Removes the last character of the focused text field.
    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    /// Focuses the next field.
    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    /// Focuses the previous field.
    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Cycles the focused choice field forward (`delta > 0`) or backward.
    ///
    /// An assignee that is not one of `people` is kept until cycled; it then
    /// moves to the first person going forward, or the last going backward.
    pub fn cycle(&mut self, delta: i32, people: &[Person]) {
        let forward = delta >= 0;
        match self.focus {
            Field::Priority => {
                self.form.priority = if forward {
                    self.form.priority.cycle_next()
                } else {
                    self.form.priority.cycle_prev()
                };
            }
            Field::Status => {
                self.form.status = if forward {
                    self.form.status.cycle_next()
                } else {
                    self.form.status.cycle_prev()
                };
            }
            Field::Assignee => {
                if let Some(person) = cycle_person(&self.form.assigned_to, forward, people) {
                    self.form.assigned_to = person.name().to_string();
                }
            }
            Field::Title | Field::Description | Field::Deadline => {}
        }
    }

    /// Closes the modal with a save.
    ///
    /// Editing yields an update carrying every field; creating yields a
    /// create.
    #[must_use]
    pub fn save(self) -> ModalAction {
        match self.mode {
            ModalMode::Create => ModalAction::Create(self.form),
            ModalMode::Edit(id) => ModalAction::Update(id, TaskPatch::from(self.form)),
        }
    }

    /// Returns the delete request, if editing.
    ///
    /// In create mode there is nothing to delete and the modal stays open.
    #[must_use]
    pub fn delete(&self) -> Option<ModalAction> {
        self.current_id().cloned().map(ModalAction::Delete)
    }
}

fn cycle_person<'a>(current: &str, forward: bool, people: &'a [Person]) -> Option<&'a Person> {
    let len = people.len();
    if len == 0 {
        return None;
    }
    let next = match people.iter().position(|p| p.name() == current) {
        Some(idx) if forward => (idx + 1) % len,
        Some(idx) => (idx + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    people.get(next)
}
