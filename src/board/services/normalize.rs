//! Total mapping from raw store records to board entities.
//!
//! None of these functions fail: unreadable fields fall back to defaults.
//! The only thing that makes a record unusable is a missing identifier,
//! reported as `None`.

use crate::board::domain::{
    Project, ProjectId, ResourceId, Task, TaskId, TaskStatus, TeamMembership,
};
use crate::board::ports::RawRecord;
use crate::config::StoreSchema;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Reads a field as non-empty text. Numbers are rendered as text.
#[must_use]
pub fn text_field(record: &RawRecord, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Reads a string field exactly as stored.
#[must_use]
pub fn verbatim_field(record: &RawRecord, field: &str) -> Option<String> {
    record.get(field)?.as_str().map(str::to_owned)
}

fn timestamp_field(record: &RawRecord, field: &str) -> Option<DateTime<Utc>> {
    let text = record.get(field)?.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

/// Reads the identifier of a resource record.
#[must_use]
pub fn resource_id(record: &RawRecord, schema: &StoreSchema) -> Option<ResourceId> {
    text_field(record, &schema.resource_id_field).map(ResourceId::new)
}

/// Maps a membership record found for `resource_id`.
#[must_use]
pub fn membership(
    record: &RawRecord,
    resource_id: &ResourceId,
    schema: &StoreSchema,
) -> TeamMembership {
    let project_id = text_field(record, &schema.membership_project_field).map(ProjectId::new);
    TeamMembership::new(resource_id.clone(), project_id)
}

/// Maps a project record.
#[must_use]
pub fn project(record: &RawRecord, schema: &StoreSchema) -> Option<Project> {
    let id = text_field(record, &schema.project_id_field)?;
    let name = text_field(record, &schema.project_name_field).unwrap_or_default();
    Some(Project::new(ProjectId::new(id), name))
}

/// Maps a task record.
#[must_use]
pub fn task(record: &RawRecord, schema: &StoreSchema) -> Option<Task> {
    let id = text_field(record, &schema.task_id_field)?;
    let name = text_field(record, &schema.task_name_field).unwrap_or_default();
    let status = TaskStatus::from_value(record.get(&schema.task_status_field));

    let mut task = Task::new(TaskId::new(id), name, status);
    if let Some(assignee) = text_field(record, &schema.task_assignee_label_field()) {
        task = task.with_assignee(assignee);
    }
    if let Some(reference) = verbatim_field(record, &schema.task_reference_field) {
        task = task.with_reference(reference);
    }
    if let Some(modified_on) = timestamp_field(record, &schema.task_modified_field) {
        task = task.with_modified_on(modified_on);
    }
    Some(task)
}
