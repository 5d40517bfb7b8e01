//! Board domain model.
//!
//! # Responsibility
//! - Define task and column records shared by store, storage and FFI.
//! - Keep field validation next to the data it guards.
//!
//! # Invariants
//! - Every task and column carries a stable id independent of its title.
//! - Deletion is a hard delete; there are no tombstones.

pub mod column;
pub mod task;
pub mod time;
pub mod validation;
