//! Domain model for the status board.
//!
//! The board domain models the viewer's link into the work-assignment graph,
//! the task entities of the selected project, and the status-partitioned
//! working copy that drag gestures mutate. Store access and rendering stay
//! outside the domain boundary.

mod board_state;
mod error;
mod ids;
mod movement;
mod project;
mod snapshot;
mod status;
mod task;

pub use board_state::{BoardState, MoveReceipt};
pub use error::BoardDomainError;
pub use ids::{ProjectId, ResourceId, TaskId, ViewerId};
pub use movement::{DropEvent, MovePhase, MoveRequest};
pub use project::{Project, Resource, TeamMembership};
pub use snapshot::{BoardSnapshot, CardView, ColumnView};
pub use status::{RawStatus, TaskStatus};
pub use task::Task;
