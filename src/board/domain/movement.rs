//! Drag-and-drop move events and the reconciliation state machine.

use super::{TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// Phase of a single move gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovePhase {
    /// No move is being processed.
    Idle,
    /// The move is applied locally and its remote write is outstanding.
    Applying,
    /// The remote write succeeded.
    Confirmed,
    /// The remote write failed and the local change was undone.
    RolledBack,
}

impl MovePhase {
    /// Returns `true` when the state machine permits moving to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Applying)
                | (Self::Applying, Self::Confirmed | Self::RolledBack)
                | (Self::Confirmed | Self::RolledBack, Self::Idle)
        )
    }
}

/// Drop notification emitted by a drag gesture source.
///
/// Group keys are whatever the source attached to each column, normally
/// [`TaskStatus::group_key`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropEvent {
    /// Identifier of the dragged card.
    pub moved_item_id: Option<String>,
    /// Key of the group the card was dragged from.
    pub source_group_key: Option<String>,
    /// Key of the group the card was dropped on.
    pub target_group_key: Option<String>,
}

impl DropEvent {
    /// Creates a fully populated drop event.
    #[must_use]
    pub fn new(
        moved_item_id: impl Into<String>,
        source_group_key: impl Into<String>,
        target_group_key: impl Into<String>,
    ) -> Self {
        Self {
            moved_item_id: Some(moved_item_id.into()),
            source_group_key: Some(source_group_key.into()),
            target_group_key: Some(target_group_key.into()),
        }
    }
}

/// A validated request to move a task between status groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    task_id: TaskId,
    source: Option<TaskStatus>,
    target: TaskStatus,
}

impl MoveRequest {
    /// Creates a move request.
    #[must_use]
    pub const fn new(task_id: TaskId, source: Option<TaskStatus>, target: TaskStatus) -> Self {
        Self {
            task_id,
            source,
            target,
        }
    }

    /// Interprets a drop event.
    ///
    /// Returns `None` when the item identifier is missing or blank, or the
    /// target key does not name a known column. An unreadable source key is
    /// tolerated since the board knows each task's current status.
    #[must_use]
    pub fn from_drop(event: &DropEvent) -> Option<Self> {
        let task_id = event
            .moved_item_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())?;
        let target = event
            .target_group_key
            .as_deref()
            .and_then(TaskStatus::from_group_key)?;
        let source = event
            .source_group_key
            .as_deref()
            .and_then(TaskStatus::from_group_key);
        Some(Self::new(TaskId::new(task_id), source, target))
    }

    /// Returns the task being moved.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the group the gesture started in, if it was readable.
    #[must_use]
    pub const fn source(&self) -> Option<&TaskStatus> {
        self.source.as_ref()
    }

    /// Returns the group the task was dropped on.
    #[must_use]
    pub const fn target(&self) -> &TaskStatus {
        &self.target
    }

    /// Returns `true` when the gesture ended where it started.
    #[must_use]
    pub fn is_same_group(&self) -> bool {
        self.source.as_ref() == Some(&self.target)
    }
}
