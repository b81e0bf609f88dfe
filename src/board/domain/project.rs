//! Records on the viewer-to-project path of the work-assignment graph.

use super::{ProjectId, ResourceId};
use serde::{Deserialize, Serialize};

/// The viewer's link into the work-assignment graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    id: ResourceId,
}

impl Resource {
    /// Creates a resource from its identifier.
    #[must_use]
    pub const fn new(id: ResourceId) -> Self {
        Self { id }
    }

    /// Returns the resource identifier.
    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        &self.id
    }
}

/// Links a resource to a project.
///
/// The project reference is optional in the store; memberships without one
/// contribute nothing to project resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    resource_id: ResourceId,
    project_id: Option<ProjectId>,
}

impl TeamMembership {
    /// Creates a membership record.
    #[must_use]
    pub const fn new(resource_id: ResourceId, project_id: Option<ProjectId>) -> Self {
        Self {
            resource_id,
            project_id,
        }
    }

    /// Returns the owning resource identifier.
    #[must_use]
    pub const fn resource_id(&self) -> &ResourceId {
        &self.resource_id
    }

    /// Returns the referenced project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }
}

/// A project the viewer can open on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
}

impl Project {
    /// Creates a project.
    #[must_use]
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
