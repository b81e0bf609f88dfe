//! Optimistic status updates for drag-and-drop moves.
//!
//! A move runs `Idle → Applying → {Confirmed, RolledBack} → Idle`: the board
//! is changed and rendered first, then the status is written to the store,
//! and a failed write puts the task back where it was and raises a notice.
//! Failed writes are never retried; the user drags again.
//!
//! Writes for the same task are not serialized. When a second move of a task
//! starts before the first write resolves, a failure of the first write
//! still restores the status that write captured, so the card can flicker
//! through an intermediate column.

use crate::board::domain::{
    BoardDomainError, BoardState, MovePhase, MoveReceipt, MoveRequest, TaskId, TaskStatus,
};
use crate::board::ports::{BoardView, Notice, RawRecord, RecordStore, RecordStoreError};
use crate::config::BoardConfig;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Remote status write failed; the move was rolled back.
#[derive(Debug, Clone, Error)]
#[error("failed to write status {target} for task {task_id}")]
pub struct WriteFailure {
    /// Task whose write failed.
    pub task_id: TaskId,
    /// Status that was being written.
    pub target: TaskStatus,
    /// Store error.
    #[source]
    pub source: RecordStoreError,
}

/// Result of processing one move gesture.
#[derive(Debug, Clone)]
pub enum MoveOutcome {
    /// Nothing happened: the task already had the target status or the
    /// gesture ended in its own group.
    Unchanged,
    /// The drop event could not be interpreted.
    Ignored,
    /// The drop referenced a task missing from the board.
    UnknownTask(TaskId),
    /// The status write succeeded.
    Confirmed {
        /// Moved task.
        task_id: TaskId,
        /// Status now stored.
        status: TaskStatus,
    },
    /// The status write failed and the board was restored.
    RolledBack {
        /// Moved task.
        task_id: TaskId,
        /// Status the task was restored to.
        restored: TaskStatus,
        /// Write error.
        failure: WriteFailure,
    },
}

impl MoveOutcome {
    /// Returns the phase the move ended in.
    #[must_use]
    pub const fn phase(&self) -> MovePhase {
        match self {
            Self::Confirmed { .. } => MovePhase::Confirmed,
            Self::RolledBack { .. } => MovePhase::RolledBack,
            Self::Unchanged | Self::Ignored | Self::UnknownTask(_) => MovePhase::Idle,
        }
    }
}

/// A move applied to the board whose remote write has not resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    receipt: MoveReceipt,
    phase: MovePhase,
}

impl PendingMove {
    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        self.receipt.task_id()
    }

    /// Returns the status captured before the move.
    #[must_use]
    pub const fn previous_status(&self) -> &TaskStatus {
        self.receipt.previous_status()
    }

    /// Returns the status being written.
    #[must_use]
    pub const fn target_status(&self) -> &TaskStatus {
        self.receipt.target_status()
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> MovePhase {
        self.phase
    }

    fn advance(&mut self, next: MovePhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "invalid move phase transition {:?} -> {next:?}",
            self.phase
        );
        self.phase = next;
    }
}

/// Coordinates local mutation, remote persistence and rollback of moves.
pub struct MoveReconciler<S, V>
where
    S: RecordStore,
    V: BoardView,
{
    store: Arc<S>,
    view: Arc<V>,
    config: Arc<BoardConfig>,
    in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S, V> MoveReconciler<S, V>
where
    S: RecordStore,
    V: BoardView,
{
    /// Creates a reconciler.
    #[must_use]
    pub const fn new(store: Arc<S>, view: Arc<V>, config: Arc<BoardConfig>) -> Self {
        Self {
            store,
            view,
            config,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Returns the number of status writes awaiting a response.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Runs a whole move: apply, write, then confirm or roll back.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not on the
    /// board. Write failures are not errors; they yield
    /// [`MoveOutcome::RolledBack`].
    pub async fn reconcile(
        &self,
        board: &mut BoardState,
        request: &MoveRequest,
    ) -> Result<MoveOutcome, BoardDomainError> {
        let Some(pending) = self.begin(board, request)? else {
            return Ok(MoveOutcome::Unchanged);
        };
        let result = self.persist(&pending).await;
        Ok(self.settle(board, pending, result))
    }

    /// Applies a move to the board and renders it.
    ///
    /// Returns `None`, without rendering, when the gesture ended in its own
    /// group or the task already has the target status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not on the
    /// board.
    pub fn begin(
        &self,
        board: &mut BoardState,
        request: &MoveRequest,
    ) -> Result<Option<PendingMove>, BoardDomainError> {
        if request.is_same_group() {
            return Ok(None);
        }
        let receipt = board.apply_move(request.task_id(), request.target().clone())?;
        if receipt.is_noop() {
            return Ok(None);
        }
        if request
            .source()
            .is_some_and(|source| source != receipt.previous_status())
        {
            tracing::debug!(
                task_id = %request.task_id(),
                board_status = %receipt.previous_status(),
                "drag source group disagrees with board; using board status"
            );
        }

        let mut pending = PendingMove {
            receipt,
            phase: MovePhase::Idle,
        };
        pending.advance(MovePhase::Applying);
        self.view.render(board);
        Ok(Some(pending))
    }

    /// Writes the pending move's status to the store.
    ///
    /// # Errors
    ///
    /// Returns [`WriteFailure`] when the store rejects or cannot take the
    /// write.
    pub async fn persist(&self, pending: &PendingMove) -> Result<(), WriteFailure> {
        let _in_flight = InFlight::enter(&self.in_flight);
        let schema = &self.config.schema;
        let mut fields = RawRecord::new();
        fields.insert(
            schema.task_status_field.clone(),
            pending
                .target_status()
                .code()
                .map_or(Value::Null, Value::from),
        );
        self.store
            .update(&schema.task_collection, pending.task_id().as_str(), fields)
            .await
            .map_err(|source| WriteFailure {
                task_id: pending.task_id().clone(),
                target: pending.target_status().clone(),
                source,
            })
    }

    /// Finishes a move once its write has resolved.
    ///
    /// On failure the task goes back to the status captured when the move
    /// began, the board is rendered again and a notice is raised.
    pub fn settle(
        &self,
        board: &mut BoardState,
        mut pending: PendingMove,
        result: Result<(), WriteFailure>,
    ) -> MoveOutcome {
        match result {
            Ok(()) => {
                pending.advance(MovePhase::Confirmed);
                tracing::info!(
                    task_id = %pending.task_id(),
                    status = %pending.target_status(),
                    "task status updated"
                );
                MoveOutcome::Confirmed {
                    task_id: pending.task_id().clone(),
                    status: pending.target_status().clone(),
                }
            }
            Err(failure) => {
                pending.advance(MovePhase::RolledBack);
                tracing::warn!(
                    task_id = %pending.task_id(),
                    restored = %pending.previous_status(),
                    error = %failure.source,
                    "status write failed; rolling back"
                );
                match board.revert(&pending.receipt) {
                    Ok(()) => self.view.render(board),
                    Err(err) => tracing::warn!(error = %err, "rollback target left the board"),
                }
                self.view.notify(&Notice {
                    task_id: pending.task_id().clone(),
                    message: self.config.write_failure_notice.clone(),
                });
                MoveOutcome::RolledBack {
                    task_id: pending.task_id().clone(),
                    restored: pending.previous_status().clone(),
                    failure,
                }
            }
        }
    }
}
