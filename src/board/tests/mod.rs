//! Unit tests for the status board.

mod support;
