//! Flutter-facing bridge crate for the kanban board core.

pub mod api;
