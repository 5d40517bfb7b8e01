//! Drag-and-drop handling for task cards.
//!
//! # Responsibility
//! - Track the in-flight gesture and its floating task.
//! - Resolve drag-end payloads into column reassignments.
//!
//! # Invariants
//! - Nothing here writes to the store or storage; the board service applies
//!   `DropOutcome::Moved`.

pub mod gesture;
pub mod resolver;
