//! Board controller tying project selection, loading, moves and creation
//! together.

use crate::board::domain::{
    BoardDomainError, BoardState, DropEvent, MoveRequest, Project, ProjectId, TaskStatus,
    ViewerId,
};
use crate::board::ports::{
    BoardView, CreateOutcome, CreateTaskRequest, RecordStore, TaskCreator, TaskCreatorError,
};
use crate::config::BoardConfig;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use super::{
    LoadFailure, MembershipResolver, MoveOutcome, MoveReconciler, ResolutionFailure, TaskLoader,
};

/// The creation surface failed; the board was not reloaded.
#[derive(Debug, Clone, Error)]
#[error("task creation failed for project {project_id}")]
pub struct CreateFailure {
    /// Project the task was being created in.
    pub project_id: ProjectId,
    /// Creation surface error.
    #[source]
    pub source: TaskCreatorError,
}

/// Errors surfaced by board session operations.
#[derive(Debug, Error)]
pub enum BoardSessionError {
    /// Project resolution failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionFailure),
    /// Task loading failed.
    #[error(transparent)]
    Load(#[from] LoadFailure),
    /// Task creation failed.
    #[error(transparent)]
    Create(#[from] CreateFailure),
    /// No project is open on the board.
    #[error("no project is selected")]
    NoActiveProject,
    /// The project is not among the viewer's projects.
    #[error("project is not accessible to the viewer: {0}")]
    UnknownProject(ProjectId),
}

/// Result type for board session operations.
pub type BoardSessionResult<T> = Result<T, BoardSessionError>;

/// Interactive board for one viewer.
///
/// Methods take `&self` and never hold the board lock across a store call,
/// so drops, project changes and creation can start while earlier status
/// writes are still in flight.
pub struct BoardSession<S, V, C>
where
    S: RecordStore,
    V: BoardView,
    C: TaskCreator,
{
    config: Arc<BoardConfig>,
    resolver: MembershipResolver<S>,
    loader: TaskLoader<S>,
    reconciler: MoveReconciler<S, V>,
    view: Arc<V>,
    creator: Arc<C>,
    state: Mutex<SessionState>,
}

#[derive(Debug, Default)]
struct SessionState {
    projects: Vec<Project>,
    board: BoardState,
}

impl<S, V, C> BoardSession<S, V, C>
where
    S: RecordStore,
    V: BoardView,
    C: TaskCreator,
{
    /// Creates a session for a viewer. Nothing is queried until
    /// [`BoardSession::start`].
    #[must_use]
    pub fn new(
        viewer: ViewerId,
        store: Arc<S>,
        view: Arc<V>,
        creator: Arc<C>,
        config: Arc<BoardConfig>,
    ) -> Self {
        Self {
            resolver: MembershipResolver::new(Arc::clone(&store), Arc::clone(&config), viewer),
            loader: TaskLoader::new(Arc::clone(&store), Arc::clone(&config)),
            reconciler: MoveReconciler::new(store, Arc::clone(&view), Arc::clone(&config)),
            config,
            view,
            creator,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Returns the viewer's projects; the first is the default selection.
    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        self.state().projects.clone()
    }

    /// Returns the project currently open on the board.
    #[must_use]
    pub fn active_project(&self) -> Option<Project> {
        let state = self.state();
        let project_id = state.board.project_id()?;
        state
            .projects
            .iter()
            .find(|project| project.id() == project_id)
            .cloned()
    }

    /// Returns a copy of the board as it stands.
    #[must_use]
    pub fn board(&self) -> BoardState {
        self.state().board.clone()
    }

    /// Returns the move reconciler.
    #[must_use]
    pub const fn reconciler(&self) -> &MoveReconciler<S, V> {
        &self.reconciler
    }

    /// Resolves the viewer's projects and opens the first one.
    ///
    /// A viewer without projects ends up with an empty, unrendered board;
    /// that is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Resolution`] when project resolution
    /// fails, leaving the project list empty, or
    /// [`BoardSessionError::Load`] when the default project cannot be loaded.
    pub async fn start(&self) -> BoardSessionResult<()> {
        let resolved = self.resolver.resolve_accessible_projects().await;
        let default_project = {
            let mut state = self.state();
            match resolved {
                Ok(projects) => {
                    state.projects = projects;
                    state.projects.first().map(|project| project.id().clone())
                }
                Err(failure) => {
                    tracing::error!(
                        viewer = %self.resolver.viewer(),
                        error = %failure.source,
                        "{failure}"
                    );
                    state.projects.clear();
                    return Err(failure.into());
                }
            }
        };
        let Some(default_project) = default_project else {
            return Ok(());
        };
        self.select_project(&default_project).await
    }

    /// Loads a project's tasks onto the board and renders it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::UnknownProject`] when the project is not
    /// one of the viewer's, or [`BoardSessionError::Load`] when the tasks
    /// cannot be loaded; the previous board is kept in both cases.
    pub async fn select_project(&self, project_id: &ProjectId) -> BoardSessionResult<()> {
        let accessible = self
            .state()
            .projects
            .iter()
            .any(|project| project.id() == project_id);
        if !accessible {
            return Err(BoardSessionError::UnknownProject(project_id.clone()));
        }
        self.reload(project_id).await
    }

    /// Handles a drop from the drag gesture source.
    ///
    /// The board is updated and rendered before the status write is sent.
    /// Never fails: stale or unreadable events are logged and reported
    /// through the outcome.
    pub async fn handle_drop(&self, event: &DropEvent) -> MoveOutcome {
        let Some(request) = MoveRequest::from_drop(event) else {
            tracing::debug!(?event, "ignoring drop without a usable item or target group");
            return MoveOutcome::Ignored;
        };
        let begun = {
            let mut state = self.state();
            self.reconciler.begin(&mut state.board, &request)
        };
        let pending = match begun {
            Ok(Some(pending)) => pending,
            Ok(None) => return MoveOutcome::Unchanged,
            Err(BoardDomainError::TaskNotFound(task_id)) => {
                tracing::warn!(
                    task_id = %task_id,
                    "drop referenced a task that is not on the board"
                );
                return MoveOutcome::UnknownTask(task_id);
            }
            Err(err) => {
                tracing::warn!(error = %err, "drop rejected");
                return MoveOutcome::Ignored;
            }
        };

        let result = self.reconciler.persist(&pending).await;
        let mut state = self.state();
        self.reconciler.settle(&mut state.board, pending, result)
    }

    /// Opens the creation surface for a task in the given column of the
    /// active project, then reloads the board once the surface closes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::NoActiveProject`] when no project is
    /// open, [`BoardSessionError::Create`] when the surface fails, or
    /// [`BoardSessionError::Load`] when the reload fails.
    pub async fn create_task(&self, status: TaskStatus) -> BoardSessionResult<CreateOutcome> {
        let active = self.state().board.project_id().cloned();
        let project_id = active.ok_or(BoardSessionError::NoActiveProject)?;
        let request = CreateTaskRequest::new(project_id.clone(), status);
        let form_parameters = request.form_parameters(&self.config.schema);

        let outcome = match self.creator.open(&request, form_parameters).await {
            Ok(outcome) => outcome,
            Err(source) => {
                tracing::error!(project = %project_id, error = %source, "task creation failed");
                return Err(CreateFailure { project_id, source }.into());
            }
        };
        self.reload(&project_id).await?;
        Ok(outcome)
    }

    async fn reload(&self, project_id: &ProjectId) -> BoardSessionResult<()> {
        match self.loader.load_tasks(project_id).await {
            Ok(tasks) => {
                let board = BoardState::from_tasks(project_id.clone(), tasks);
                let mut state = self.state();
                state.board = board;
                self.view.render(&state.board);
                Ok(())
            }
            Err(failure) => {
                tracing::error!(project = %project_id, error = %failure.source, "{failure}");
                Err(failure.into())
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
