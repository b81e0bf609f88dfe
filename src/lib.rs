//! Taskboard: status board core for embedded work-item widgets.
//!
//! This crate provides the data pipeline behind a board that shows a
//! viewer's work items grouped by status and lets them drag items between
//! columns: resolving which projects the viewer can open, loading and
//! normalizing tasks, and keeping the board consistent with the backing
//! store while status writes are in flight.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the record store, the render
//!   surface and the record-creation surface
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`board`]: Project resolution, task loading, board state and move
//!   reconciliation
//! - [`config`]: Store schema and board settings

pub mod board;
pub mod config;
