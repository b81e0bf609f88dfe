//! Port contracts for the status board.
//!
//! Ports define the collaborators the board core consumes: the record store,
//! the render surface, and the record-creation surface.

pub mod creator;
pub mod record_store;
pub mod view;

pub use creator::{CreateOutcome, CreateTaskRequest, TaskCreator, TaskCreatorError};
pub use record_store::{
    Filter, OrderBy, RawRecord, RecordQuery, RecordStore, RecordStoreError, RecordStoreResult,
};
pub use view::{BoardView, Notice};
