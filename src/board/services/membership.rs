//! Resolution of the projects a viewer can open.
//!
//! The viewer reaches projects through two hops: viewer → resource records
//! → team memberships → project identifiers. The hops are separate store
//! queries without a transaction, so memberships may change in between.

use crate::board::domain::{Project, ProjectId, ResourceId, TeamMembership, ViewerId};
use crate::board::ports::{Filter, RecordQuery, RecordStore, RecordStoreError};
use crate::config::{BoardConfig, ProjectOrdering};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::normalize;

/// Query hop that failed during project resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    /// Looking up the viewer's resource records.
    Resources,
    /// Looking up a resource's team memberships.
    Memberships,
    /// Looking up the referenced projects.
    Projects,
}

impl fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resources => "resources",
            Self::Memberships => "team memberships",
            Self::Projects => "projects",
        })
    }
}

/// Project resolution failed; no projects can be shown.
#[derive(Debug, Clone, Error)]
#[error("failed to resolve accessible projects while querying {stage}")]
pub struct ResolutionFailure {
    /// Hop that failed.
    pub stage: ResolutionStage,
    /// Store error.
    #[source]
    pub source: RecordStoreError,
}

/// Derives the projects a viewer has access to.
#[derive(Clone)]
pub struct MembershipResolver<S>
where
    S: RecordStore,
{
    store: Arc<S>,
    config: Arc<BoardConfig>,
    viewer: ViewerId,
}

impl<S> MembershipResolver<S>
where
    S: RecordStore,
{
    /// Creates a resolver for one viewer.
    #[must_use]
    pub const fn new(store: Arc<S>, config: Arc<BoardConfig>, viewer: ViewerId) -> Self {
        Self {
            store,
            config,
            viewer,
        }
    }

    /// Returns the viewer this resolver works for.
    #[must_use]
    pub const fn viewer(&self) -> &ViewerId {
        &self.viewer
    }

    /// Returns the viewer's projects, without duplicates, ordered per
    /// configuration.
    ///
    /// A viewer without resource records, or whose memberships reference no
    /// project, gets an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionFailure`] when any store query fails.
    pub async fn resolve_accessible_projects(&self) -> Result<Vec<Project>, ResolutionFailure> {
        let resources = self.resources().await?;
        if resources.is_empty() {
            tracing::info!(viewer = %self.viewer, "no resource found for viewer");
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let mut project_ids = Vec::new();
        for resource_id in &resources {
            for membership in self.memberships(resource_id).await? {
                let Some(project_id) = membership.project_id() else {
                    continue;
                };
                if seen.insert(project_id.clone()) {
                    project_ids.push(project_id.clone());
                }
            }
        }
        if project_ids.is_empty() {
            tracing::info!(viewer = %self.viewer, "viewer's team memberships reference no project");
            return Ok(Vec::new());
        }

        let mut projects = self.projects(&project_ids).await?;
        if self.config.project_ordering == ProjectOrdering::ByName {
            projects.sort_by_cached_key(|project| {
                (project.name().to_lowercase(), project.id().clone())
            });
        }
        tracing::debug!(
            viewer = %self.viewer,
            count = projects.len(),
            "resolved accessible projects"
        );
        Ok(projects)
    }

    async fn resources(&self) -> Result<Vec<ResourceId>, ResolutionFailure> {
        let schema = &self.config.schema;
        let query = RecordQuery::new(&schema.resource_collection)
            .select([&schema.resource_id_field])
            .filter(Filter::eq(&schema.resource_viewer_field, self.viewer.as_str()));
        let records = self
            .store
            .query(&query)
            .await
            .map_err(|source| ResolutionFailure {
                stage: ResolutionStage::Resources,
                source,
            })?;
        Ok(records
            .iter()
            .filter_map(|record| normalize::resource_id(record, schema))
            .collect())
    }

    async fn memberships(
        &self,
        resource_id: &ResourceId,
    ) -> Result<Vec<TeamMembership>, ResolutionFailure> {
        let schema = &self.config.schema;
        let query = RecordQuery::new(&schema.membership_collection)
            .select([&schema.membership_project_field])
            .filter(Filter::eq(&schema.membership_resource_field, resource_id.as_str()));
        let records = self
            .store
            .query(&query)
            .await
            .map_err(|source| ResolutionFailure {
                stage: ResolutionStage::Memberships,
                source,
            })?;
        tracing::debug!(resource = %resource_id, count = records.len(), "loaded team memberships");
        Ok(records
            .iter()
            .map(|record| normalize::membership(record, resource_id, schema))
            .collect())
    }

    async fn projects(&self, project_ids: &[ProjectId]) -> Result<Vec<Project>, ResolutionFailure> {
        let schema = &self.config.schema;
        let query = RecordQuery::new(&schema.project_collection)
            .select([&schema.project_name_field, &schema.project_id_field])
            .filter(Filter::any_of(
                &schema.project_id_field,
                project_ids.iter().map(ProjectId::as_str),
            ));
        let records = self
            .store
            .query(&query)
            .await
            .map_err(|source| ResolutionFailure {
                stage: ResolutionStage::Projects,
                source,
            })?;

        let mut seen = HashSet::new();
        Ok(records
            .iter()
            .filter_map(|record| normalize::project(record, schema))
            .filter(|project| seen.insert(project.id().clone()))
            .collect())
    }
}
