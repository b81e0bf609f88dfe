//! Render model handed to board views.

use super::{BoardState, Task, TaskId, TaskStatus};
use crate::config::BoardConfig;
use serde::Serialize;

/// Column-by-column view of a board.
///
/// The four known columns are always present, in column order, followed by
/// one unlabeled column per unrecognized status found on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// Columns in display order.
    pub columns: Vec<ColumnView>,
}

/// One status column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    /// Status the column represents.
    pub status: TaskStatus,
    /// Column heading; `None` for unlabeled groups.
    pub label: Option<&'static str>,
    /// Key a drag source should echo back for this column.
    pub group_key: String,
    /// Cards in board order.
    pub cards: Vec<CardView>,
}

/// One task card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    /// Task identifier, used as the drag item id.
    pub task_id: TaskId,
    /// Card title including the reference code when present.
    pub title: String,
    /// Assignee label shown under the title.
    pub subtitle: Option<String>,
    /// Link to the task's edit form, when one can be built.
    pub link: Option<String>,
}

impl BoardSnapshot {
    /// Builds the render model for a board.
    ///
    /// Cards link to their edit form when `config` names a client URL.
    #[must_use]
    pub fn from_board(board: &BoardState, config: &BoardConfig) -> Self {
        let card = |task: &Task| CardView {
            task_id: task.id().clone(),
            title: task.title(),
            subtitle: task.assignee().map(str::to_owned),
            link: config.record_url(task.id()),
        };
        let column = |status: TaskStatus| ColumnView {
            label: status.label(),
            group_key: status.group_key(),
            cards: board.tasks_for_status(&status).iter().map(&card).collect(),
            status,
        };

        let unlabeled = board
            .groups()
            .map(|(status, _)| status)
            .filter(|status| !status.is_known())
            .cloned();
        let columns = TaskStatus::COLUMNS
            .into_iter()
            .chain(unlabeled)
            .map(column)
            .collect();
        Self { columns }
    }

    /// Returns the column for a status, if present.
    #[must_use]
    pub fn column(&self, status: &TaskStatus) -> Option<&ColumnView> {
        self.columns.iter().find(|column| &column.status == status)
    }
}

impl ColumnView {
    /// Returns the card identifiers in order.
    #[must_use]
    pub fn task_ids(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.task_id.as_str()).collect()
    }
}
