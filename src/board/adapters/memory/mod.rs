//! In-memory adapter implementations for testing and embedding.
//!
//! These adapters provide simple, thread-safe implementations of every board
//! port, with hooks to script failures.

mod creator;
mod record_store;
mod view;

pub use creator::ScriptedTaskCreator;
pub use record_store::InMemoryRecordStore;
pub use view::RecordingBoardView;
