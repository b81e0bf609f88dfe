//! Status-partitioned working copy of the active project's tasks.

use super::{BoardDomainError, ProjectId, Task, TaskId, TaskStatus};
use std::collections::{BTreeMap, HashSet};

/// In-memory board for the active project.
///
/// Every task sits in exactly one status group. Groups keep the order the
/// tasks were loaded in; moved tasks are appended to their target group
/// rather than re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    project_id: Option<ProjectId>,
    groups: BTreeMap<TaskStatus, Vec<Task>>,
}

/// Record of a status change, sufficient to undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReceipt {
    task_id: TaskId,
    previous_status: TaskStatus,
    previous_position: usize,
    target_status: TaskStatus,
}

impl MoveReceipt {
    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the status the task had before the move.
    #[must_use]
    pub const fn previous_status(&self) -> &TaskStatus {
        &self.previous_status
    }

    /// Returns the task's index within its previous group.
    #[must_use]
    pub const fn previous_position(&self) -> usize {
        self.previous_position
    }

    /// Returns the status the task was moved to.
    #[must_use]
    pub const fn target_status(&self) -> &TaskStatus {
        &self.target_status
    }

    /// Returns `true` when the move left the board untouched.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.previous_status == self.target_status
    }
}

impl BoardState {
    /// Creates an empty board with no active project.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Partitions loaded tasks by status, preserving their order.
    ///
    /// Repeated identifiers keep their first occurrence only.
    #[must_use]
    pub fn from_tasks(project_id: ProjectId, tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut seen = HashSet::new();
        let mut groups: BTreeMap<TaskStatus, Vec<Task>> = BTreeMap::new();
        for task in tasks {
            if !seen.insert(task.id().clone()) {
                tracing::warn!(task_id = %task.id(), "duplicate task in load; keeping first");
                continue;
            }
            groups.entry(task.status().clone()).or_default().push(task);
        }
        Self {
            project_id: Some(project_id),
            groups,
        }
    }

    /// Returns the project this board shows.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns the ordered tasks of one status group.
    #[must_use]
    pub fn tasks_for_status(&self, status: &TaskStatus) -> &[Task] {
        self.groups.get(status).map_or(&[], Vec::as_slice)
    }

    /// Returns the non-empty groups in column order.
    pub fn groups(&self) -> impl Iterator<Item = (&TaskStatus, &[Task])> {
        self.groups
            .iter()
            .map(|(status, tasks)| (status, tasks.as_slice()))
    }

    /// Returns all tasks, group by group.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.groups.values().flatten()
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks().find(|task| task.id() == task_id)
    }

    /// Returns `true` when the task is on the board.
    #[must_use]
    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task(task_id).is_some()
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns `true` when the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Changes a task's status and returns the status it had before.
    ///
    /// Setting the status a task already has is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not on
    /// the board.
    pub fn set_status(
        &mut self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> Result<TaskStatus, BoardDomainError> {
        self.apply_move(task_id, status)
            .map(|receipt| receipt.previous_status)
    }

    /// Moves a task to the end of the target group.
    ///
    /// The returned receipt can be handed to [`BoardState::revert`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not on
    /// the board.
    pub fn apply_move(
        &mut self,
        task_id: &TaskId,
        target_status: TaskStatus,
    ) -> Result<MoveReceipt, BoardDomainError> {
        let (previous_status, previous_position) = self
            .locate(task_id)
            .ok_or_else(|| BoardDomainError::TaskNotFound(task_id.clone()))?;
        let receipt = MoveReceipt {
            task_id: task_id.clone(),
            previous_status,
            previous_position,
            target_status,
        };
        if receipt.is_noop() {
            return Ok(receipt);
        }

        let mut task = self
            .take(&receipt.previous_status, previous_position)
            .ok_or_else(|| BoardDomainError::TaskNotFound(task_id.clone()))?;
        task.set_status(receipt.target_status.clone());
        self.groups
            .entry(receipt.target_status.clone())
            .or_default()
            .push(task);
        Ok(receipt)
    }

    /// Puts a moved task back into its previous group and position.
    ///
    /// The task is taken from whichever group it is in now, so a later move
    /// of the same task is overridden.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task has left the
    /// board since the move, for example after a reload.
    pub fn revert(&mut self, receipt: &MoveReceipt) -> Result<(), BoardDomainError> {
        if receipt.is_noop() {
            return Ok(());
        }
        let (current_status, current_position) = self
            .locate(receipt.task_id())
            .ok_or_else(|| BoardDomainError::TaskNotFound(receipt.task_id().clone()))?;
        let mut task = self
            .take(&current_status, current_position)
            .ok_or_else(|| BoardDomainError::TaskNotFound(receipt.task_id().clone()))?;
        task.set_status(receipt.previous_status.clone());
        let group = self
            .groups
            .entry(receipt.previous_status.clone())
            .or_default();
        let position = receipt.previous_position().min(group.len());
        group.insert(position, task);
        Ok(())
    }

    /// Inserts a task at the front of a status group.
    ///
    /// A task already on the board under the same identifier is replaced.
    pub fn insert_task(&mut self, mut task: Task, status: TaskStatus) {
        if let Some((current_status, current_position)) = self.locate(task.id()) {
            let _replaced = self.take(&current_status, current_position);
        }
        task.set_status(status.clone());
        self.groups.entry(status).or_default().insert(0, task);
    }

    fn locate(&self, task_id: &TaskId) -> Option<(TaskStatus, usize)> {
        self.groups.iter().find_map(|(status, tasks)| {
            tasks
                .iter()
                .position(|task| task.id() == task_id)
                .map(|position| (status.clone(), position))
        })
    }

    fn take(&mut self, status: &TaskStatus, position: usize) -> Option<Task> {
        let group = self.groups.get_mut(status)?;
        if position >= group.len() {
            return None;
        }
        let task = group.remove(position);
        if group.is_empty() {
            self.groups.remove(status);
        }
        Some(task)
    }
}
