//! Render surface port.

use crate::board::domain::{BoardState, TaskId};

/// User-visible notice raised by the board core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Task the notice concerns.
    pub task_id: TaskId,
    /// Text shown to the user.
    pub message: String,
}

/// Visual component that displays the board.
///
/// Both calls happen on the interaction thread and must not block on I/O.
pub trait BoardView: Send + Sync {
    /// Redraws the board from the given state.
    fn render(&self, board: &BoardState);

    /// Shows a blocking notice, such as a failed status write.
    fn notify(&self, notice: &Notice);
}
