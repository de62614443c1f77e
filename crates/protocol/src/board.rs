//! Kanban board types and structures.
//!
//! The board is a disposable view over the last task list fetched from the
//! server. [`KanbanBoard::rebuild`] replaces both the column contents and the
//! retained per-card records wholesale; the only other mutation is the
//! optimistic [`KanbanBoard::move_card`] performed on a drop, which moves a
//! card between columns without touching its record.

use std::collections::HashMap;

use crate::task::{Status, Task, TaskId};

/// A single column of the board.
///
/// Lanes hold task ids in server list order; the task data itself lives in
/// the board's retained record map.
///
/// # Examples
///
/// ```
/// use corkboard_protocol::{Lane, Status};
///
/// let lane = Lane::new(Status::Blocked);
/// assert!(lane.is_empty());
/// assert_eq!(lane.status, Status::Blocked);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    /// The status whose key this column carries.
    pub status: Status,
    /// Ids of the cards in this column, top to bottom.
    pub cards: Vec<TaskId>,
}

impl Lane {
    /// Creates a new empty lane for the given status.
    #[must_use]
    pub const fn new(status: Status) -> Self {
        Self {
            status,
            cards: Vec::new(),
        }
    }

    /// Returns the number of cards in this lane.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if the lane has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns `true` if this lane holds the card with the given id.
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.cards.contains(id)
    }

    fn remove(&mut self, id: &TaskId) -> bool {
        match self.cards.iter().position(|card| card == id) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// A Kanban board with five fixed columns, one per [`Status`].
///
/// # Examples
///
/// ```
/// use corkboard_protocol::{KanbanBoard, Priority, Status, Task, TaskId};
///
/// let task = Task {
///     id: TaskId::from(1),
///     title: "Fix bug".into(),
///     description: String::new(),
///     assigned_to: "Persona1".into(),
///     priority: Priority::High,
///     status: Status::Todo,
///     end_date: "2024-01-01".into(),
/// };
///
/// let mut board = KanbanBoard::new();
/// board.rebuild(vec![task]);
///
/// assert_eq!(board.placement(&TaskId::from(1)), Some(Status::Todo));
/// assert_eq!(board.lane(Status::Todo).len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanBoard {
    lanes: [Lane; 5],
    records: HashMap<TaskId, Task>,
}

impl Default for KanbanBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl KanbanBoard {
    /// Creates a new empty board with five lanes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lanes: Status::all().map(Lane::new),
            records: HashMap::new(),
        }
    }

    /// Returns all lanes in column order.
    #[must_use]
    pub const fn lanes(&self) -> &[Lane; 5] {
        &self.lanes
    }

    /// Returns the lane for the given status.
    #[must_use]
    pub fn lane(&self, status: Status) -> &Lane {
        &self.lanes[status.index()]
    }

    fn lane_mut(&mut self, status: Status) -> &mut Lane {
        &mut self.lanes[status.index()]
    }

    /// Clears every column and refills them from `tasks`.
    ///
    /// Each task is appended to the column whose key equals its status, in
    /// iteration order. The retained records are replaced by the same list.
    /// If the list repeats an id, the last occurrence wins and the card
    /// appears only once.
    pub fn rebuild(&mut self, tasks: impl IntoIterator<Item = Task>) {
        for lane in &mut self.lanes {
            lane.cards.clear();
        }
        self.records.clear();

        for task in tasks {
            if let Some(previous) = self.records.get(&task.id) {
                let status = previous.status;
                self.lane_mut(status).remove(&task.id);
            }
            self.lane_mut(task.status).cards.push(task.id.clone());
            self.records.insert(task.id.clone(), task);
        }
    }

    /// Returns the retained server record for a card.
    #[must_use]
    pub fn record(&self, id: &TaskId) -> Option<&Task> {
        self.records.get(id)
    }

    /// Returns the status of the column currently holding a card.
    ///
    /// This differs from the record's status between an optimistic drop and
    /// the rebuild that follows it.
    #[must_use]
    pub fn placement(&self, id: &TaskId) -> Option<Status> {
        self.lanes
            .iter()
            .find(|lane| lane.contains(id))
            .map(|lane| lane.status)
    }

    /// Returns the task shown at `index` in the given column.
    #[must_use]
    pub fn task_at(&self, status: Status, index: usize) -> Option<&Task> {
        self.lane(status)
            .cards
            .get(index)
            .and_then(|id| self.records.get(id))
    }

    /// Moves a card to the end of another column.
    ///
    /// The retained record is left as the server last reported it. Returns
    /// `false` if no column holds the card.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_protocol::{KanbanBoard, Status, TaskId};
    ///
    /// let mut board = KanbanBoard::new();
    /// assert!(!board.move_card(&TaskId::from(9), Status::Done));
    /// ```
    pub fn move_card(&mut self, id: &TaskId, to: Status) -> bool {
        let Some(from) = self.placement(id) else {
            return false;
        };
        self.lane_mut(from).remove(id);
        self.lane_mut(to).cards.push(id.clone());
        true
    }

    /// Returns the total number of cards across all columns.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.lanes.iter().map(Lane::len).sum()
    }

    /// Returns `true` if no column holds a card.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_cards() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::fixtures::fix_bug;
    use crate::task::Priority;

    fn task(id: u64, status: Status) -> Task {
        Task {
            id: TaskId::from(id),
            title: format!("Task {id}"),
            description: String::new(),
            assigned_to: "Persona2".to_string(),
            priority: Priority::Medium,
            status,
            end_date: String::new(),
        }
    }

    #[test]
    fn new_board_has_five_empty_lanes() {
        let board = KanbanBoard::new();
        for (i, lane) in board.lanes().iter().enumerate() {
            assert_eq!(lane.status.index(), i);
            assert!(lane.is_empty());
        }
        assert!(board.is_empty());
    }

    #[test]
    fn rebuild_places_tasks_by_status_in_list_order() {
        let mut board = KanbanBoard::new();
        board.rebuild(vec![
            task(1, Status::Todo),
            task(2, Status::Done),
            task(3, Status::Todo),
        ]);

        assert_eq!(
            board.lane(Status::Todo).cards,
            vec![TaskId::from(1), TaskId::from(3)]
        );
        assert_eq!(board.lane(Status::Done).cards, vec![TaskId::from(2)]);
        assert_eq!(board.total_cards(), 3);
    }

    #[test]
    fn rebuild_discards_previous_contents() {
        let mut board = KanbanBoard::new();
        board.rebuild(vec![task(1, Status::Todo), task(2, Status::Blocked)]);
        board.rebuild(vec![task(2, Status::Done)]);

        assert_eq!(board.total_cards(), 1);
        assert!(board.record(&TaskId::from(1)).is_none());
        assert_eq!(board.placement(&TaskId::from(2)), Some(Status::Done));
    }

    #[test]
    fn rebuild_with_duplicate_id_keeps_last() {
        let mut board = KanbanBoard::new();
        board.rebuild(vec![task(1, Status::Todo), task(1, Status::Blocked)]);

        assert_eq!(board.total_cards(), 1);
        assert_eq!(board.placement(&TaskId::from(1)), Some(Status::Blocked));
        assert_eq!(
            board.record(&TaskId::from(1)).map(|t| t.status),
            Some(Status::Blocked)
        );
    }

    #[test]
    fn move_card_leaves_record_untouched() {
        let mut board = KanbanBoard::new();
        board.rebuild(vec![fix_bug()]);
        let id = TaskId::from(1);

        assert!(board.move_card(&id, Status::Done));

        assert_eq!(board.placement(&id), Some(Status::Done));
        assert!(board.lane(Status::Todo).is_empty());
        assert_eq!(board.record(&id), Some(&fix_bug()));
    }

    #[test]
    fn move_card_into_own_column_keeps_single_copy() {
        let mut board = KanbanBoard::new();
        board.rebuild(vec![task(1, Status::Todo), task(2, Status::Todo)]);

        assert!(board.move_card(&TaskId::from(1), Status::Todo));
        assert_eq!(
            board.lane(Status::Todo).cards,
            vec![TaskId::from(2), TaskId::from(1)]
        );
    }

    #[test]
    fn task_at_resolves_records() {
        let mut board = KanbanBoard::new();
        board.rebuild(vec![fix_bug()]);

        assert_eq!(
            board.task_at(Status::Todo, 0).map(|t| t.title.as_str()),
            Some("Fix bug")
        );
        assert!(board.task_at(Status::Todo, 1).is_none());
        assert!(board.task_at(Status::Done, 0).is_none());
    }
}
