//! Board configuration.
//!
//! Every collection and field name the board reads from or writes to the
//! record store lives in [`StoreSchema`], so the board can sit on top of any
//! store layout. All settings have defaults; a JSON document only needs to
//! name what it overrides.

use crate::board::domain::TaskId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default text of the notice shown when a status write fails.
pub const DEFAULT_WRITE_FAILURE_NOTICE: &str = "Failed to update status. Please try again.";

/// Top-level board settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Collection and field names in the record store.
    pub schema: StoreSchema,
    /// How the resolved projects are ordered; the first one opens by default.
    pub project_ordering: ProjectOrdering,
    /// Base URL used to build edit-form links for task cards.
    pub client_url: Option<String>,
    /// Notice shown to the user when a status write is rolled back.
    pub write_failure_notice: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            schema: StoreSchema::default(),
            project_ordering: ProjectOrdering::default(),
            client_url: None,
            write_failure_notice: DEFAULT_WRITE_FAILURE_NOTICE.to_owned(),
        }
    }
}

impl BoardConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is not valid JSON or
    /// has fields of the wrong type, and [`ConfigError::Invalid`] when a
    /// collection or field name is empty.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document).map_err(ConfigError::Parse)?;
        config.schema.validate()?;
        Ok(config)
    }

    /// Builds the edit-form link for a task, when a client URL is set.
    #[must_use]
    pub fn record_url(&self, task_id: &TaskId) -> Option<String> {
        let base = self.client_url.as_deref()?.trim_end_matches('/');
        Some(format!(
            "{base}/main.aspx?etn={}&pagetype=entityrecord&id={task_id}",
            self.schema.task_collection
        ))
    }
}

/// Ordering applied to resolved projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectOrdering {
    /// Case-insensitive display name, then identifier.
    #[default]
    ByName,
    /// Whatever order the store returned.
    StoreOrder,
}

/// Collection and field names in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSchema {
    /// Collection holding resource records.
    pub resource_collection: String,
    /// Resource identifier field.
    pub resource_id_field: String,
    /// Resource field holding the viewer identity.
    pub resource_viewer_field: String,
    /// Collection holding team membership records.
    pub membership_collection: String,
    /// Membership field referencing the resource.
    pub membership_resource_field: String,
    /// Membership field referencing the project.
    pub membership_project_field: String,
    /// Collection holding project records.
    pub project_collection: String,
    /// Project identifier field.
    pub project_id_field: String,
    /// Project display name field.
    pub project_name_field: String,
    /// Collection holding task records.
    pub task_collection: String,
    /// Task identifier field.
    pub task_id_field: String,
    /// Task display name field.
    pub task_name_field: String,
    /// Task status code field.
    pub task_status_field: String,
    /// Task field referencing the project.
    pub task_project_field: String,
    /// Task field referencing the assignee.
    pub task_assignee_field: String,
    /// Suffix appended to the assignee field to read its display label.
    pub formatted_value_suffix: String,
    /// Task external reference code field.
    pub task_reference_field: String,
    /// Task last-modified timestamp field.
    pub task_modified_field: String,
}

impl Default for StoreSchema {
    fn default() -> Self {
        Self {
            resource_collection: "resources".to_owned(),
            resource_id_field: "resource_id".to_owned(),
            resource_viewer_field: "user_id".to_owned(),
            membership_collection: "project_team_members".to_owned(),
            membership_resource_field: "resource_id".to_owned(),
            membership_project_field: "project_id".to_owned(),
            project_collection: "projects".to_owned(),
            project_id_field: "project_id".to_owned(),
            project_name_field: "name".to_owned(),
            task_collection: "project_tasks".to_owned(),
            task_id_field: "task_id".to_owned(),
            task_name_field: "task_name".to_owned(),
            task_status_field: "status".to_owned(),
            task_project_field: "project_id".to_owned(),
            task_assignee_field: "created_by".to_owned(),
            formatted_value_suffix: "@OData.Community.Display.V1.FormattedValue".to_owned(),
            task_reference_field: "reference".to_owned(),
            task_modified_field: "modified_on".to_owned(),
        }
    }
}

impl StoreSchema {
    /// Returns the field holding the assignee's display label.
    #[must_use]
    pub fn task_assignee_label_field(&self) -> String {
        format!("{}{}", self.task_assignee_field, self.formatted_value_suffix)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("resource_collection", &self.resource_collection),
            ("resource_id_field", &self.resource_id_field),
            ("resource_viewer_field", &self.resource_viewer_field),
            ("membership_collection", &self.membership_collection),
            ("membership_resource_field", &self.membership_resource_field),
            ("membership_project_field", &self.membership_project_field),
            ("project_collection", &self.project_collection),
            ("project_id_field", &self.project_id_field),
            ("project_name_field", &self.project_name_field),
            ("task_collection", &self.task_collection),
            ("task_id_field", &self.task_id_field),
            ("task_name_field", &self.task_name_field),
            ("task_status_field", &self.task_status_field),
            ("task_project_field", &self.task_project_field),
            ("task_assignee_field", &self.task_assignee_field),
            ("task_reference_field", &self.task_reference_field),
            ("task_modified_field", &self.task_modified_field),
        ];
        match names.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((setting, _)) => Err(ConfigError::Invalid(format!(
                "schema.{setting} must not be empty"
            ))),
            None => Ok(()),
        }
    }
}

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be deserialized.
    #[error("failed to parse board configuration: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document parsed but holds an unusable value.
    #[error("invalid board configuration: {0}")]
    Invalid(String),
}
