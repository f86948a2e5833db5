//! Unit tests for the board module.
//!
//! Tests are organised by concern: the ordering engine, filtering and the
//! derived views, and controller orchestration against in-memory stores.

mod ordering_tests;
pub(crate) mod support;
