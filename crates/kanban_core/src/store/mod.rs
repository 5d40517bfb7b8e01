//! Client-side board state container.
//!
//! # Responsibility
//! - Keep the UI-facing copy of tasks and columns in memory.
//! - Produce column-grouped snapshots for rendering.
//!
//! # See also
//! - `service::board_service` for the persistence-aware mutation paths.

pub mod board_store;
