//! Record-creation surface port.

use crate::board::domain::{ProjectId, TaskId, TaskStatus};
use crate::config::StoreSchema;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::RawRecord;

/// Parameters for opening the task creation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    status: TaskStatus,
}

impl CreateTaskRequest {
    /// Creates a request for a task in the given project and column.
    #[must_use]
    pub const fn new(project_id: ProjectId, status: TaskStatus) -> Self {
        Self { project_id, status }
    }

    /// Returns the project the task will belong to.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the column the task starts in.
    #[must_use]
    pub const fn status(&self) -> &TaskStatus {
        &self.status
    }

    /// Returns the form fields to pre-populate: a project binding and the
    /// status code.
    #[must_use]
    pub fn form_parameters(&self, schema: &StoreSchema) -> RawRecord {
        let mut fields = RawRecord::new();
        fields.insert(
            format!("{}@odata.bind", schema.task_project_field),
            Value::String(format!(
                "/{}({})",
                schema.project_collection, self.project_id
            )),
        );
        if let Some(code) = self.status.code() {
            fields.insert(schema.task_status_field.clone(), Value::from(code));
        }
        fields
    }
}

/// How the creation surface was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A task was saved.
    Created(TaskId),
    /// The surface was closed without saving.
    Dismissed,
}

/// Errors returned by creation surfaces.
#[derive(Debug, Clone, Error)]
pub enum TaskCreatorError {
    /// The surface could not be opened.
    #[error("creation surface unavailable: {0}")]
    Unavailable(String),

    /// The surface failed while open.
    #[error("creation surface failed: {0}")]
    Failed(Arc<dyn std::error::Error + Send + Sync>),
}

/// External record-creation surface.
#[async_trait]
pub trait TaskCreator: Send + Sync {
    /// Opens the surface pre-populated from the request and resolves once
    /// it is closed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCreatorError`] when the surface cannot be shown or fails.
    async fn open(
        &self,
        request: &CreateTaskRequest,
        form_parameters: RawRecord,
    ) -> Result<CreateOutcome, TaskCreatorError>;
}
