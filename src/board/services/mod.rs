//! Application services for the status board.

mod loader;
mod membership;
pub mod normalize;
mod reconciler;
mod session;

pub use loader::{LoadFailure, TaskLoader};
pub use membership::{MembershipResolver, ResolutionFailure, ResolutionStage};
pub use reconciler::{MoveOutcome, MoveReconciler, PendingMove, WriteFailure};
pub use session::{BoardSession, BoardSessionError, BoardSessionResult, CreateFailure};
