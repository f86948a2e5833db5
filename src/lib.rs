//! Taskboard: a kanban task board with drag-and-drop ordering.
//!
//! Tasks belong to one owner, carry a status (`todo`, `in-progress`, `done`)
//! and an integer position within their status column. Dragging a card
//! reorders its column or moves it to another column; the board applies the
//! move immediately and persists it in the background, reloading from
//! storage if persistence fails.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and summarization
//! - **Adapters**: In-memory, `PostgreSQL` and HTTP implementations of ports
//!
//! # Modules
//!
//! - [`board`]: Tasks, categories, ordering and the board controller
//! - [`config`]: YAML and environment configuration

pub mod board;
pub mod config;
