//! Core use-case services.
//!
//! # Responsibility
//! - Compose store, drag session and persistence gateway into board actions.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod board_service;
