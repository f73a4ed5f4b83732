//! Note filtering entry points.
//!
//! # Responsibility
//! - Expose case-insensitive substring filtering over the in-memory
//!   collection.
//! - Keep result shaping (borrowed views, stored order) inside core.

pub mod filter;
