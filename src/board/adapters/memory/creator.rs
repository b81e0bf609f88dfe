//! Task creation surface with scripted results.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::board::ports::{
    CreateOutcome, CreateTaskRequest, RawRecord, TaskCreator, TaskCreatorError,
};

/// Creation surface that answers from a queue of scripted results.
///
/// When the queue is empty the surface behaves as if the user dismissed it.
#[derive(Debug, Default)]
pub struct ScriptedTaskCreator {
    state: Mutex<ScriptedState>,
}

#[derive(Debug, Default)]
struct ScriptedState {
    script: VecDeque<Result<CreateOutcome, TaskCreatorError>>,
    opened: Vec<(CreateTaskRequest, RawRecord)>,
}

impl ScriptedTaskCreator {
    /// Creates a surface with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the result of the next `open` call.
    pub fn push_result(&self, result: Result<CreateOutcome, TaskCreatorError>) {
        self.lock().script.push_back(result);
    }

    /// Returns every request the surface was opened with, with its form
    /// parameters.
    #[must_use]
    pub fn opened(&self) -> Vec<(CreateTaskRequest, RawRecord)> {
        self.lock().opened.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TaskCreator for ScriptedTaskCreator {
    async fn open(
        &self,
        request: &CreateTaskRequest,
        form_parameters: RawRecord,
    ) -> Result<CreateOutcome, TaskCreatorError> {
        let mut state = self.lock();
        state.opened.push((request.clone(), form_parameters));
        state
            .script
            .pop_front()
            .unwrap_or(Ok(CreateOutcome::Dismissed))
    }
}
