//! Status board core.
//!
//! Resolves the projects a viewer can open, loads the selected project's
//! tasks into a status-partitioned board, and reconciles drag-and-drop
//! status changes with the record store using optimistic updates. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
