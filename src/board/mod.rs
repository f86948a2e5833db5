//! Kanban task board.
//!
//! Tasks sit in three status columns and are moved between and within them
//! by drag and drop. The board applies each move locally, stores it, and
//! reloads from storage when storing fails. The module follows hexagonal
//! architecture:
//!
//! - Domain types and the ordering engine in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The board controller and prioritization in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
