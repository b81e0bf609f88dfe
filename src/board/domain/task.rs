//! Task entity shown as a card on the board.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A work item of the selected project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    status: TaskStatus,
    assignee: Option<String>,
    reference: Option<String>,
    modified_on: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a task with the required fields.
    #[must_use]
    pub fn new(id: TaskId, name: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            assignee: None,
            reference: None,
            modified_on: None,
        }
    }

    /// Sets the assignee display label.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the external reference code.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the last-modified timestamp.
    #[must_use]
    pub const fn with_modified_on(mut self, modified_on: DateTime<Utc>) -> Self {
        self.modified_on = Some(modified_on);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> &TaskStatus {
        &self.status
    }

    /// Returns the assignee display label, if the store provided one.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    /// Returns the external reference code, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Returns the last-modified timestamp, if known.
    #[must_use]
    pub const fn modified_on(&self) -> Option<DateTime<Utc>> {
        self.modified_on
    }

    /// Returns the card title: `"<reference> - <name>"`, or just the name.
    #[must_use]
    pub fn title(&self) -> String {
        match self.reference() {
            Some(reference) if !reference.is_empty() => format!("{reference} - {}", self.name),
            _ => self.name.clone(),
        }
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}
