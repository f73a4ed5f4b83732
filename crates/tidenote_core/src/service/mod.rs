//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, codec and repository calls into use-case APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod notes_manager;
