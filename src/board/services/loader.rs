//! Loading of a project's tasks.

use crate::board::domain::{ProjectId, Task};
use crate::board::ports::{Filter, OrderBy, RecordQuery, RecordStore, RecordStoreError};
use crate::config::BoardConfig;
use std::sync::Arc;
use thiserror::Error;

use super::normalize;

/// Task query for a project failed; the previous board stays in place.
#[derive(Debug, Clone, Error)]
#[error("failed to load tasks for project {project_id}")]
pub struct LoadFailure {
    /// Project whose tasks were requested.
    pub project_id: ProjectId,
    /// Store error.
    #[source]
    pub source: RecordStoreError,
}

/// Fetches and normalizes task records.
#[derive(Clone)]
pub struct TaskLoader<S>
where
    S: RecordStore,
{
    store: Arc<S>,
    config: Arc<BoardConfig>,
}

impl<S> TaskLoader<S>
where
    S: RecordStore,
{
    /// Creates a task loader.
    #[must_use]
    pub const fn new(store: Arc<S>, config: Arc<BoardConfig>) -> Self {
        Self { store, config }
    }

    /// Builds the task query for a project, most recently modified first.
    #[must_use]
    pub fn query_for(&self, project_id: &ProjectId) -> RecordQuery {
        let schema = &self.config.schema;
        RecordQuery::new(&schema.task_collection)
            .select([
                &schema.task_id_field,
                &schema.task_name_field,
                &schema.task_status_field,
                &schema.task_assignee_field,
                &schema.task_reference_field,
                &schema.task_modified_field,
            ])
            .filter(Filter::eq(&schema.task_project_field, project_id.as_str()))
            .order_by(OrderBy::descending(&schema.task_modified_field))
    }

    /// Returns the project's tasks in the order the store yields them.
    ///
    /// Records with an unknown status still load; records without an
    /// identifier are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LoadFailure`] when the store query fails.
    pub async fn load_tasks(&self, project_id: &ProjectId) -> Result<Vec<Task>, LoadFailure> {
        let records = self
            .store
            .query(&self.query_for(project_id))
            .await
            .map_err(|source| LoadFailure {
                project_id: project_id.clone(),
                source,
            })?;

        let schema = &self.config.schema;
        let total = records.len();
        let tasks: Vec<Task> = records
            .iter()
            .filter_map(|record| normalize::task(record, schema))
            .collect();
        if tasks.len() < total {
            tracing::warn!(
                project = %project_id,
                skipped = total - tasks.len(),
                "skipped task records without an identifier"
            );
        }
        tracing::info!(project = %project_id, count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }
}
