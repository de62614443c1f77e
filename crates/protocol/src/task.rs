//! Task-related types for the Kanban board.
//!
//! This module defines the task entity as the board sees it ([`Task`]), the
//! raw record exchanged with the task API ([`TaskRecord`]), and the request
//! bodies used to create ([`NewTask`]) and partially update ([`TaskPatch`])
//! tasks.
//!
//! Records coming off the wire keep `status` and `priority` as plain strings.
//! Converting a [`TaskRecord`] into a [`Task`] is the single place where those
//! values are validated against the closed [`Status`] and [`Priority`] sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ProtocolError, Result};

/// Server-assigned identifier of a task.
///
/// The task API may hand out numeric or string identifiers. Both are kept in
/// their textual form, so `1` and `"1"` refer to the same task.
///
/// # Examples
///
/// ```
/// use corkboard_protocol::TaskId;
///
/// let from_number: TaskId = serde_json::from_str("42").unwrap();
/// let from_string: TaskId = serde_json::from_str(r#""42""#).unwrap();
/// assert_eq!(from_number, from_string);
/// assert_eq!(from_number.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(String);

impl TaskId {
    /// Creates an identifier from its textual form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct TaskIdVisitor;

        impl Visitor<'_> for TaskIdVisitor {
            type Value = TaskId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a task id as a string or an integer")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(TaskId::new(v))
            }

            fn visit_string<E>(self, v: String) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(TaskId(v))
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(TaskId::from(v))
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(TaskId(v.to_string()))
            }
        }

        deserializer.deserialize_any(TaskIdVisitor)
    }
}

/// The workflow status of a task.
///
/// Each status is also the key of exactly one board column. The set is
/// closed: anything else coming from the server is rejected at the boundary.
///
/// # Examples
///
/// ```
/// use corkboard_protocol::Status;
///
/// assert_eq!(Status::InProgress.key(), "in-progress");
/// assert_eq!("blocked".parse::<Status>().unwrap(), Status::Blocked);
/// assert!("archived".parse::<Status>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Not yet planned.
    #[default]
    Backlog,
    /// Planned, not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Waiting on something outside the task.
    Blocked,
    /// Finished.
    Done,
}

impl Status {
    /// Returns all statuses in column order.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::Status;
    ///
    /// let all = Status::all();
    /// assert_eq!(all.len(), 5);
    /// assert_eq!(all[0], Status::Backlog);
    /// assert_eq!(all[4], Status::Done);
    /// ```
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Backlog,
            Self::Todo,
            Self::InProgress,
            Self::Blocked,
            Self::Done,
        ]
    }

    /// Returns the wire key, which is also the column key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }

    /// Returns a human-readable column title.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::Status;
    ///
    /// assert_eq!(Status::Todo.display_name(), "To Do");
    /// assert_eq!(Status::InProgress.display_name(), "In Progress");
    /// ```
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Blocked => "Blocked",
            Self::Done => "Done",
        }
    }

    /// Returns the column index of this status (0-4).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Backlog => 0,
            Self::Todo => 1,
            Self::InProgress => 2,
            Self::Blocked => 3,
            Self::Done => 4,
        }
    }

    /// Creates a `Status` from its column index.
    ///
    /// Returns `None` if the index is out of range (>= 5).
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::Status;
    ///
    /// assert_eq!(Status::from_index(3), Some(Status::Blocked));
    /// assert_eq!(Status::from_index(5), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Backlog),
            1 => Some(Self::Todo),
            2 => Some(Self::InProgress),
            3 => Some(Self::Blocked),
            4 => Some(Self::Done),
            _ => None,
        }
    }

    /// Returns the next status in column order, wrapping to the first.
    #[must_use]
    pub const fn cycle_next(self) -> Self {
        match Self::from_index(self.index() + 1) {
            Some(next) => next,
            None => Self::Backlog,
        }
    }

    /// Returns the previous status in column order, wrapping to the last.
    #[must_use]
    pub const fn cycle_prev(self) -> Self {
        match self.index().checked_sub(1) {
            Some(idx) => match Self::from_index(idx) {
                Some(prev) => prev,
                None => Self::Done,
            },
            None => Self::Done,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Status {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|status| status.key() == s)
            .ok_or_else(|| ProtocolError::UnknownStatus(s.to_string()))
    }
}

/// Task priority.
///
/// Serialized capitalized (`"High"`); parsing is case-insensitive so that
/// `"high"` from a hand-edited record is still understood.
///
/// # Examples
///
/// ```
/// use corkboard_protocol::Priority;
///
/// assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
/// assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), r#""Medium""#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    /// Can wait.
    #[default]
    Low,
    /// Normal.
    Medium,
    /// Urgent.
    High,
}

impl Priority {
    /// Returns all priorities from lowest to highest.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    /// Returns the label used on the wire and on cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns the next priority, wrapping from `High` back to `Low`.
    #[must_use]
    pub const fn cycle_next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// Returns the previous priority, wrapping from `Low` to `High`.
    #[must_use]
    pub const fn cycle_prev(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|priority| priority.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProtocolError::UnknownPriority(s.to_string()))
    }
}

impl Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A task as returned by the task API, before validation.
///
/// Missing or `null` text fields become empty strings, and numbers or
/// booleans keep their JSON spelling. `status` and `priority` are kept
/// verbatim so that an unknown value can be reported with its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Short summary.
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    /// Longer free text.
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Person the task is assigned to.
    #[serde(default, deserialize_with = "lenient_text")]
    pub assigned_to: String,
    /// Deadline, as display text.
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: String,
    /// Raw status key.
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: String,
    /// Raw priority label.
    #[serde(default, deserialize_with = "lenient_text")]
    pub priority: String,
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    })
}

/// The records of a list response, decoded one element at a time.
///
/// An element that cannot be read as a record (not an object, or without a
/// usable `id`) lands in `malformed` with its position; the other elements
/// are unaffected.
#[derive(Debug, Default)]
pub struct RecordBatch {
    /// Elements that decoded as records, in response order.
    pub records: Vec<TaskRecord>,
    /// Position and decoding error of every other element.
    pub malformed: Vec<(usize, ProtocolError)>,
}

impl RecordBatch {
    /// Number of elements in the response.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len() + self.malformed.len()
    }

    /// Returns `true` if the response held no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<TaskRecord>> for RecordBatch {
    fn from(records: Vec<TaskRecord>) -> Self {
        Self {
            records,
            malformed: Vec::new(),
        }
    }
}

/// A validated task on the board.
///
/// # Examples
///
/// ```
/// use corkboard_protocol::{Priority, Status, Task, TaskRecord};
///
/// let record: TaskRecord = serde_json::from_str(
///     r#"{"id": 1, "title": "Fix bug", "description": "", "assignedTo": "Persona1",
///         "endDate": "2024-01-01", "status": "todo", "priority": "High"}"#,
/// ).unwrap();
///
/// let task = Task::try_from(record).unwrap();
/// assert_eq!(task.status, Status::Todo);
/// assert_eq!(task.priority, Priority::High);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Short summary.
    pub title: String,
    /// Longer free text.
    pub description: String,
    /// Person the task is assigned to.
    pub assigned_to: String,
    /// Priority of the task.
    pub priority: Priority,
    /// Workflow status, equal to the key of the column holding the task.
    pub status: Status,
    /// Deadline, as display text.
    pub end_date: String,
}

impl Task {
    /// Returns every field except the id, as a creation body.
    ///
    /// Used to build full-field updates from the retained record.
    #[must_use]
    pub fn fields(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            assigned_to: self.assigned_to.clone(),
            end_date: self.end_date.clone(),
            status: self.status,
            priority: self.priority,
        }
    }

    /// Applies a partial update, leaving absent fields untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::{Priority, Status, Task, TaskId, TaskPatch};
    ///
    /// let mut task = Task {
    ///     id: TaskId::from(1),
    ///     title: "Fix bug".into(),
    ///     description: String::new(),
    ///     assigned_to: "Persona1".into(),
    ///     priority: Priority::High,
    ///     status: Status::Todo,
    ///     end_date: "2024-01-01".into(),
    /// };
    ///
    /// task.apply(&TaskPatch::status_only(Status::Done));
    /// assert_eq!(task.status, Status::Done);
    /// assert_eq!(task.title, "Fix bug");
    /// ```
    pub fn apply(&mut self, patch: &TaskPatch) {
        patch.apply_text(
            &mut self.title,
            &mut self.description,
            &mut self.assigned_to,
            &mut self.end_date,
        );
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

impl TaskRecord {
    /// Applies a partial update the way the task API does: absent fields are
    /// untouched, and status and priority are stored as their wire spelling.
    ///
    /// Works on records that would fail validation, so a store can hold and
    /// patch whatever the API hands back.
    pub fn apply(&mut self, patch: &TaskPatch) {
        patch.apply_text(
            &mut self.title,
            &mut self.description,
            &mut self.assigned_to,
            &mut self.end_date,
        );
        if let Some(status) = patch.status {
            self.status = status.key().to_string();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority.label().to_string();
        }
    }

    /// Decodes a JSON array of records, as returned by the list endpoint.
    ///
    /// Each element is decoded on its own, so one malformed element does not
    /// hide the rest of the list.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::DeserializationFailed`] if the body is not a
    /// JSON array.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::TaskRecord;
    ///
    /// let batch = TaskRecord::list_from_json(
    ///     br#"[{"id": 1, "status": "todo", "priority": "Low"}, {"title": "no id"}]"#,
    /// ).unwrap();
    ///
    /// assert_eq!(batch.records.len(), 1);
    /// assert_eq!(batch.malformed[0].0, 1);
    /// ```
    pub fn list_from_json(body: &[u8]) -> Result<RecordBatch> {
        let elements: Vec<serde_json::Value> =
            serde_json::from_slice(body).map_err(ProtocolError::DeserializationFailed)?;

        let mut batch = RecordBatch::default();
        for (index, element) in elements.into_iter().enumerate() {
            match serde_json::from_value(element) {
                Ok(record) => batch.records.push(record),
                Err(e) => batch
                    .malformed
                    .push((index, ProtocolError::DeserializationFailed(e))),
            }
        }
        Ok(batch)
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = ProtocolError;

    fn try_from(record: TaskRecord) -> Result<Self> {
        let status = record.status.parse()?;
        let priority = record.priority.parse()?;
        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            assigned_to: record.assigned_to,
            priority,
            status,
            end_date: record.end_date,
        })
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            assigned_to: task.assigned_to,
            end_date: task.end_date,
            status: task.status.key().to_string(),
            priority: task.priority.label().to_string(),
        }
    }
}

/// Body of a create request: every task field except the id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Short summary.
    pub title: String,
    /// Longer free text.
    pub description: String,
    /// Person the task is assigned to.
    pub assigned_to: String,
    /// Deadline, as display text.
    pub end_date: String,
    /// Initial status.
    pub status: Status,
    /// Priority.
    pub priority: Priority,
}

impl NewTask {
    /// Materializes the task the server is expected to create under `id`.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            assigned_to: self.assigned_to,
            priority: self.priority,
            status: self.status,
            end_date: self.end_date,
        }
    }
}

/// Body of a partial update. Absent fields are left out of the JSON.
///
/// # Examples
///
/// ```
/// use corkboard_protocol::{Status, TaskPatch};
///
/// let patch = TaskPatch::status_only(Status::Done);
/// assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"status":"done"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl TaskPatch {
    /// Creates a patch that only changes the status.
    #[must_use]
    pub fn status_only(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Overrides the status carried by this patch.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    fn apply_text(
        &self,
        title: &mut String,
        description: &mut String,
        assigned_to: &mut String,
        end_date: &mut String,
    ) {
        for (patched, field) in [
            (&self.title, title),
            (&self.description, description),
            (&self.assigned_to, assigned_to),
            (&self.end_date, end_date),
        ] {
            if let Some(value) = patched {
                field.clone_from(value);
            }
        }
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<NewTask> for TaskPatch {
    fn from(fields: NewTask) -> Self {
        Self {
            title: Some(fields.title),
            description: Some(fields.description),
            assigned_to: Some(fields.assigned_to),
            priority: Some(fields.priority),
            end_date: Some(fields.end_date),
            status: Some(fields.status),
        }
    }
}
