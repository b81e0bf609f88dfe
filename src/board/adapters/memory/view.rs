//! Board view that records what it was asked to show.

use std::sync::{Mutex, PoisonError};

use crate::board::domain::BoardState;
use crate::board::ports::{BoardView, Notice};

/// Thread-safe recording view.
#[derive(Debug, Default)]
pub struct RecordingBoardView {
    state: Mutex<RecordingState>,
}

#[derive(Debug, Default)]
struct RecordingState {
    renders: usize,
    last_rendered: Option<BoardState>,
    notices: Vec<Notice>,
}

impl RecordingBoardView {
    /// Creates a view with nothing recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times the board was rendered.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.lock().renders
    }

    /// Returns the most recently rendered board.
    #[must_use]
    pub fn last_rendered(&self) -> Option<BoardState> {
        self.lock().last_rendered.clone()
    }

    /// Returns the notices raised so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().notices.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecordingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BoardView for RecordingBoardView {
    fn render(&self, board: &BoardState) {
        let mut state = self.lock();
        state.renders += 1;
        state.last_rendered = Some(board.clone());
    }

    fn notify(&self, notice: &Notice) {
        self.lock().notices.push(notice.clone());
    }
}
