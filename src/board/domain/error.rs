//! Error types for board domain validation and state changes.

use super::TaskId;
use thiserror::Error;

/// Errors returned by board domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The viewer identity is empty after normalization.
    #[error("viewer identity must not be empty")]
    EmptyViewerId,

    /// The task identifier is not part of the current board snapshot.
    #[error("task not found on board: {0}")]
    TaskNotFound(TaskId),
}
